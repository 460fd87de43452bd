// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote repository hosting.
//!
//! ```text
//! RemoteHost (trait)
//!   current_identity(token)              GET  /user
//!   repository_exists(token, owner, repo) GET  /repos/{owner}/{repo}   200 | 404
//!   create_repository(token, request)     POST /user/repos | /orgs/{org}/repos  → 201
//!
//! GitHubClient ──► reqwest (global client, per-request timeout)
//! ```
//!
//! Owner and repository names are checked against GitHub's charset before
//! they are placed in a URL path.

mod github;


use std::future::Future;

use serde::Serialize;

use crate::error::{GeniusResult, RemoteError};

pub use github::GitHubClient;

/// Who the credential belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteIdentity {
    User { login: String },
    /// Validation skipped because the session is offline.
    Offline,
}

impl RemoteIdentity {
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        match self {
            Self::User { login } => Some(login),
            Self::Offline => None,
        }
    }
}

/// Account names: ASCII letters, digits and hyphens, no hyphen at either end.
#[must_use]
pub fn is_valid_owner(owner: &str) -> bool {
    (1..=39).contains(&owner.len())
        && !owner.starts_with('-')
        && !owner.ends_with('-')
        && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Repository names: ASCII letters, digits, `.`, `_` and `-`, never `.` or `..`.
#[must_use]
pub fn is_valid_repository_name(name: &str) -> bool {
    (1..=100).contains(&name.len())
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Reject names that would change the meaning of an API path.
pub(crate) fn check_names(owner: &str, repo: &str) -> Result<(), RemoteError> {
    if !is_valid_owner(owner) {
        return Err(RemoteError::InvalidName {
            what: "owner",
            value: owner.to_string(),
        });
    }
    if !is_valid_repository_name(repo) {
        return Err(RemoteError::InvalidName {
            what: "repository",
            value: repo.to_string(),
        });
    }
    Ok(())
}

/// Parameters for creating a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRepository {
    pub name: String,
    pub private: bool,
    /// Create under this organization instead of the authenticated user.
    #[serde(skip)]
    pub organization: Option<String>,
}

/// Narrow contract to the hosting API.
pub trait RemoteHost {
    /// Web base URL, e.g. `https://github.com`.
    fn web_url(&self) -> &str;

    /// Resolve the credential's owner.
    fn current_identity(&self, token: &str) -> impl Future<Output = GeniusResult<RemoteIdentity>>;

    /// `true` for 200, `false` for 404, error for anything else.
    fn repository_exists(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> impl Future<Output = GeniusResult<bool>>;

    fn create_repository(
        &self,
        token: &str,
        request: &NewRepository,
    ) -> impl Future<Output = GeniusResult<()>>;

    /// Clone URL without any credential.
    fn repository_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/{owner}/{repo}.git", self.web_url().trim_end_matches('/'))
    }

    /// Clone URL carrying `token` as userinfo.
    fn authenticated_url(&self, token: &str, owner: &str, repo: &str) -> String {
        let base = self.web_url().trim_end_matches('/');
        let (scheme, host) = base.split_once("://").unwrap_or(("https", base));
        format!("{scheme}://{token}@{host}/{owner}/{repo}.git")
    }
}
