// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use tracing::info;

use super::Workflow;
use crate::error::{GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::RemoteHost;
use crate::state::WorkflowConfig;
use crate::ui::Console;

/// How configured and checked-out branch were brought into agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No commits or no observable branch; nothing to compare.
    NoCommits,
    InSync,
    /// The on-disk branch was renamed to the configured one.
    RenamedBranch { to: String },
    /// The configuration now names the on-disk branch.
    ConfigUpdated { branch: String },
}

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// Bring the configured branch in line with the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::ReconcileFailed` if the updated configuration
    /// cannot be saved.
    pub fn reconcile_branch(&self) -> GeniusResult<ReconcileOutcome> {
        let (mut config, dir) = self.begin();
        let _span = operation_span("reconcile", &dir).entered();
        self.reconcile(&mut config, &dir)
    }

    /// Offer one resolution per call: rename the on-disk branch, or adopt
    /// it in the configuration. A failed rename falls back to adopting.
    pub(super) fn reconcile(
        &self,
        config: &mut WorkflowConfig,
        dir: &Path,
    ) -> GeniusResult<ReconcileOutcome> {
        if !self.git.is_repository(dir) || !self.git.has_commit(dir) {
            return Ok(ReconcileOutcome::NoCommits);
        }
        let current = self.git.current_branch(dir);
        if current.is_empty() {
            return Ok(ReconcileOutcome::NoCommits);
        }
        if current == config.branch {
            return Ok(ReconcileOutcome::InSync);
        }

        self.console.warn("Branch mismatch detected");
        self.console
            .info(&format!("Configured branch : {}", config.branch));
        self.console.info(&format!("Git branch        : {current}"));

        if self
            .console
            .confirm(&format!("Rename git branch to {}?", config.branch))
        {
            let out = self.git.run(dir, &["branch", "-m", &config.branch])?;
            if out.success {
                info!(from = %current, to = %config.branch, "branch renamed");
                self.console
                    .success(&format!("Git branch renamed to: {}", config.branch));
                return Ok(ReconcileOutcome::RenamedBranch {
                    to: config.branch.clone(),
                });
            }
            self.console.warn("Branch rename failed");
            self.audit().record("git branch -m", &out.message());
        }

        config.branch.clone_from(&current);
        self.store
            .save(config)
            .map_err(|e| WorkflowError::ReconcileFailed {
                message: e.to_string(),
            })?;
        info!(branch = %current, "configured branch updated");
        self.console
            .success(&format!("Config branch updated to: {current}"));
        Ok(ReconcileOutcome::ConfigUpdated { branch: current })
    }
}
