// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args ──► run_command ──┬─► menu::run_menu ──► execute (per choice)
//!                            └─► execute
//!                                  workflow ops | doctor | options
//! ```

pub mod config;
pub mod menu;
pub mod workflow;


use crate::config::Settings;
use crate::error::GeniusError;
use crate::git::VcsGateway;
use crate::remote::RemoteHost;
use crate::state::{AuditLog, CredentialStore, StateStore};
use crate::ui::{Console, redact_credentials};
use crate::workflow::{SessionContext, Workflow};

/// Everything one invocation works with.
pub struct AppContext<G, C, H> {
    pub git: G,
    pub console: C,
    pub host: H,
    pub store: StateStore,
    pub settings: Settings,
    /// Settings files that were found, for `options`.
    pub settings_sources: Vec<String>,
}

impl<G, C, H> AppContext<G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// Fresh session: reads the stored token again.
    #[must_use]
    pub fn session(&self) -> SessionContext {
        let credentials = CredentialStore::new(self.store.control().clone());
        SessionContext::open(&self.settings, &credentials)
    }

    #[must_use]
    pub fn workflow(&self) -> Workflow<'_, G, C, H> {
        Workflow::new(
            &self.git,
            &self.console,
            &self.host,
            &self.store,
            self.session(),
        )
    }

    /// Tell the operator what failed, why it may have failed and where the
    /// details were recorded.
    pub fn report_failure(&self, err: &GeniusError) {
        self.console
            .error(&redact_credentials(&err.to_string()));

        let causes = err.as_workflow().map(|w| w.causes()).unwrap_or_default();
        if !causes.is_empty() {
            self.console.info("Possible causes:");
            for cause in causes {
                self.console.info(&format!("  - {cause}"));
            }
        }

        if err.is_auditable() {
            let log = AuditLog::new(self.store.control().clone());
            self.console
                .info(&format!("Details logged to {}", log.path().display()));
        }
    }
}

pub use workflow::run_command;
