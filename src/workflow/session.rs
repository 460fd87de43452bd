// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::config::Settings;
use crate::error::{GeniusResult, WorkflowError};
use crate::remote::{RemoteHost, RemoteIdentity};
use crate::state::CredentialStore;

/// Per-request facts shared by the orchestrator and the health auditor.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Whether hosting API calls may be attempted.
    pub online: bool,
    /// Access token, if one is stored.
    pub token: Option<String>,
    pub settings: Settings,
}

impl SessionContext {
    #[must_use]
    pub fn new(settings: Settings, token: Option<String>) -> Self {
        Self {
            online: !settings.network.offline,
            token,
            settings,
        }
    }

    /// Session for one operation, reading the stored token.
    #[must_use]
    pub fn open(settings: &Settings, credentials: &CredentialStore) -> Self {
        Self::new(settings.clone(), credentials.get())
    }

    /// Validate the token against the host.
    ///
    /// Offline sessions skip the call and report [`RemoteIdentity::Offline`].
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::MissingCredential` without a token, or the
    /// host's error when validation fails.
    pub async fn identity<H: RemoteHost>(&self, host: &H) -> GeniusResult<RemoteIdentity> {
        let token = self
            .token
            .as_deref()
            .ok_or(WorkflowError::MissingCredential)?;
        if !self.online {
            return Ok(RemoteIdentity::Offline);
        }
        host.current_identity(token).await
    }
}
