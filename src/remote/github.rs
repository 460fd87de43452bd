// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

use super::{NewRepository, RemoteHost, RemoteIdentity, check_names, is_valid_repository_name};
use crate::config::GithubSettings;
use crate::error::{GeniusResult, RemoteError};

/// Global HTTP client, initialized once.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("genius-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

/// GitHub REST API client.
#[derive(Debug, Clone, bon::Builder)]
pub struct GitHubClient {
    #[builder(into, default = "https://api.github.com".to_string())]
    api_url: String,
    #[builder(into, default = "https://github.com".to_string())]
    web_url: String,
    /// Timeout for repository calls.
    #[builder(default = Duration::from_secs(10))]
    timeout: Duration,
    /// Timeout for identity validation.
    #[builder(default = Duration::from_secs(5))]
    validate_timeout: Duration,
}

impl GitHubClient {
    #[must_use]
    pub fn from_settings(settings: &GithubSettings) -> Self {
        Self::builder()
            .api_url(settings.api_url.as_str())
            .web_url(settings.web_url.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .validate_timeout(Duration::from_secs(settings.validate_timeout_secs))
            .build()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url.trim_end_matches('/'))
    }

    fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("token {token}"))
            .header(ACCEPT, "application/vnd.github+json")
    }

    async fn send(request: RequestBuilder) -> GeniusResult<Response> {
        Ok(request.send().await.map_err(RemoteError::from)?)
    }
}

/// Map a non-success response onto a typed failure.
pub(super) fn classify(status: StatusCode, headers: &HeaderMap, url: &str) -> RemoteError {
    let url = url.to_string();
    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    match status {
        StatusCode::TOO_MANY_REQUESTS => RemoteError::RateLimited { url },
        StatusCode::FORBIDDEN if quota_exhausted => RemoteError::RateLimited { url },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized {
            status: status.as_u16(),
            url,
        },
        StatusCode::NOT_FOUND => RemoteError::NotFound { url },
        _ => RemoteError::Api {
            status: status.as_u16(),
            url,
        },
    }
}

impl RemoteHost for GitHubClient {
    fn web_url(&self) -> &str {
        &self.web_url
    }

    async fn current_identity(&self, token: &str) -> GeniusResult<RemoteIdentity> {
        let url = self.endpoint("/user");
        debug!(%url, "validating token");
        let request = Self::authorized(global_client().get(&url), token).timeout(self.validate_timeout);
        let response = Self::send(request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(classify(status, response.headers(), &url).into());
        }
        let user: UserResponse = response.json().await.map_err(RemoteError::from)?;
        Ok(RemoteIdentity::User { login: user.login })
    }

    async fn repository_exists(&self, token: &str, owner: &str, repo: &str) -> GeniusResult<bool> {
        check_names(owner, repo)?;
        let url = self.endpoint(&format!("/repos/{owner}/{repo}"));
        debug!(%url, "checking repository");
        let request = Self::authorized(global_client().get(&url), token).timeout(self.timeout);
        let response = Self::send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(classify(status, response.headers(), &url).into()),
        }
    }

    async fn create_repository(&self, token: &str, request: &NewRepository) -> GeniusResult<()> {
        let url = match &request.organization {
            Some(org) => {
                check_names(org, &request.name)?;
                self.endpoint(&format!("/orgs/{org}/repos"))
            }
            None if !is_valid_repository_name(&request.name) => {
                return Err(RemoteError::InvalidName {
                    what: "repository",
                    value: request.name.clone(),
                }
                .into());
            }
            None => self.endpoint("/user/repos"),
        };
        debug!(%url, name = %request.name, private = request.private, "creating repository");
        let builder = Self::authorized(global_client().post(&url), token)
            .timeout(self.timeout)
            .json(request);
        let response = Self::send(builder).await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            Ok(())
        } else {
            Err(classify(status, response.headers(), &url).into())
        }
    }
}
