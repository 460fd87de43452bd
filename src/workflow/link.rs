// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote create-or-link.

use std::path::Path;
use tracing::{Instrument, info, warn};

use super::Workflow;
use crate::error::{GeniusError, GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::{
    NewRepository, RemoteHost, RemoteIdentity, is_valid_owner, is_valid_repository_name,
};
use crate::state::WorkflowConfig;
use crate::ui::Console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The remote now points at `url`. `created` when the hosted repository
    /// was created by this call.
    Linked { url: String, created: bool },
    /// The hosted repository is missing and the operator declined to create it.
    Declined,
}

fn check_causes() -> Vec<String> {
    vec![
        "Invalid or expired token".to_string(),
        "GitHub API rate limit reached".to_string(),
        "Organisation access denied".to_string(),
    ]
}

fn creation_causes(owner: &str) -> Vec<String> {
    vec![
        format!("You are not an owner or admin of organisation: {owner}"),
        "Token lacks the `repo` permission".to_string(),
        "Organisation restricts repository creation".to_string(),
    ]
}

/// The authenticated user is `owner` itself rather than a member of it.
fn owned_by(identity: &RemoteIdentity, owner: &str) -> bool {
    identity
        .login()
        .is_some_and(|login| login.eq_ignore_ascii_case(owner))
}

fn record_ownership(config: &mut WorkflowConfig, personal: bool) {
    config.is_organization_owner = !personal;
    config.org_name = if personal {
        String::new()
    } else {
        config.owner.clone()
    };
}

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// Make sure the hosted repository exists, creating it on request, and
    /// point the configured remote at it. The remote URL carries no
    /// credential; remote commands supply the session token instead.
    ///
    /// `owner` and `repo` override the stored identity; missing values are
    /// prompted for.
    ///
    /// # Errors
    ///
    /// Precondition failures (`MissingInput`, `MissingCredential`,
    /// `Offline`, `RepositoryRequired`) are returned untouched;
    /// `RemoteCheckFailed` and `RepoCreationFailed` carry likely causes.
    pub async fn create_or_link(
        &self,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> GeniusResult<LinkOutcome> {
        let (config, dir) = self.begin();
        let span = operation_span("link", &dir);
        self.link_repository(config, &dir, owner, repo)
            .instrument(span)
            .await
    }

    async fn link_repository(
        &self,
        mut config: WorkflowConfig,
        dir: &Path,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> GeniusResult<LinkOutcome> {
        self.require_repository(dir, &config.branch)?;
        self.resolve_repository_identity(&mut config, owner, repo)?;

        let token = self
            .session
            .token
            .clone()
            .ok_or(WorkflowError::MissingCredential)?;
        if !self.session.online {
            return Err(WorkflowError::Offline.into());
        }

        let exists = self.check_remote_repository(&token, &config).await?;
        let created = if exists {
            self.console.success("GitHub repository already exists");
            self.record_existing_ownership(&token, &mut config).await;
            false
        } else {
            self.console.warn("GitHub repository does not exist");
            if !self.console.confirm("Create repository on GitHub now?") {
                self.console.warn("Repository creation skipped");
                return Ok(LinkOutcome::Declined);
            }
            let private = self.console.confirm("Make repository PRIVATE?");
            self.create_remote_repository(&token, &mut config, private)
                .await?;
            true
        };

        let url = self.host.repository_url(&config.owner, &config.repo_name);
        self.replace_remote(dir, &config.remote_name, &url)?;
        config.repo_created_remotely = true;
        self.store.save(&config)?;

        info!(%url, created, "remote linked");
        self.console.success("GitHub repository linked successfully");
        self.console
            .info("Push, pull and fetch authenticate with the stored GitHub token");
        Ok(LinkOutcome::Linked { url, created })
    }

    /// Fill owner and repository name from overrides, then prompts, and
    /// check both against GitHub's naming rules.
    pub(super) fn resolve_repository_identity(
        &self,
        config: &mut WorkflowConfig,
        owner: Option<&str>,
        repo: Option<&str>,
    ) -> GeniusResult<()> {
        if let Some(owner) = owner.map(str::trim).filter(|v| !v.is_empty()) {
            config.owner = owner.to_string();
        }
        if let Some(repo) = repo.map(str::trim).filter(|v| !v.is_empty()) {
            config.repo_name = repo.to_string();
        }
        if config.owner.is_empty() {
            config.owner = self.console.input("GitHub username or organisation");
        }
        if config.repo_name.is_empty() {
            config.repo_name = self.console.input("Repository name");
        }
        if config.owner.is_empty() {
            return Err(WorkflowError::MissingInput { what: "owner" }.into());
        }
        if config.repo_name.is_empty() {
            return Err(WorkflowError::MissingInput {
                what: "repository name",
            }
            .into());
        }
        if !is_valid_owner(&config.owner) {
            return Err(WorkflowError::InvalidName {
                what: "owner",
                value: config.owner.clone(),
            }
            .into());
        }
        if !is_valid_repository_name(&config.repo_name) {
            return Err(WorkflowError::InvalidName {
                what: "repository name",
                value: config.repo_name.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Existence check, mapping API failures onto `RemoteCheckFailed`.
    pub(super) async fn check_remote_repository(
        &self,
        token: &str,
        config: &WorkflowConfig,
    ) -> GeniusResult<bool> {
        self.host
            .repository_exists(token, &config.owner, &config.repo_name)
            .await
            .map_err(|e| {
                self.fail(
                    "repo exists check failed",
                    WorkflowError::RemoteCheckFailed {
                        owner: config.owner.clone(),
                        repo: config.repo_name.clone(),
                        message: e.to_string(),
                        causes: check_causes(),
                    },
                )
            })
    }

    /// Record whether an existing repository belongs to the token's user or
    /// to an organisation. An identity failure leaves `config` unchanged.
    pub(super) async fn record_existing_ownership(&self, token: &str, config: &mut WorkflowConfig) {
        match self.host.current_identity(token).await {
            Ok(identity) => {
                let personal = owned_by(&identity, &config.owner);
                record_ownership(config, personal);
            }
            Err(e) => warn!(error = %e, "repository ownership not recorded"),
        }
    }

    /// Create the hosted repository and record it in `config`.
    ///
    /// The repository goes under an organisation when the owner differs
    /// from the authenticated user.
    pub(super) async fn create_remote_repository(
        &self,
        token: &str,
        config: &mut WorkflowConfig,
        private: bool,
    ) -> GeniusResult<()> {
        let creation_failed = |e: GeniusError| {
            self.fail(
                "repo creation failed",
                WorkflowError::RepoCreationFailed {
                    owner: config.owner.clone(),
                    repo: config.repo_name.clone(),
                    message: e.to_string(),
                    causes: creation_causes(&config.owner),
                },
            )
        };

        let identity = self
            .host
            .current_identity(token)
            .await
            .map_err(creation_failed)?;
        let personal = owned_by(&identity, &config.owner);
        let request = NewRepository {
            name: config.repo_name.clone(),
            private,
            organization: (!personal).then(|| config.owner.clone()),
        };

        self.host
            .create_repository(token, &request)
            .await
            .map_err(creation_failed)?;

        config.private_repo = private;
        record_ownership(config, personal);
        config.repo_created_remotely = true;
        info!(owner = %config.owner, repo = %config.repo_name, private, "repository created");
        self.console.success("GitHub repository created successfully");
        Ok(())
    }
}
