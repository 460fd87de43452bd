// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pull, smart pull, fetch and status.
//!
//! ```text
//! smart pull:
//!   dirty? ──no──────────────────────────► pull ──ok──► Pulled
//!     │                                      └─fail──► PullFailed
//!     yes ─ confirm? ─no──► Declined
//!             │
//!            yes ─► stash ─fail─► StashFailed
//!                     │
//!                     ▼
//!                   pull ──ok──► pop ─ok─► Pulled { stash_restored }
//!                     │               └fail► RestoredWithConflicts
//!                     └─fail─► pop ─► PullFailed { stash_restored }
//! ```

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use super::{Workflow, failure_text};
use crate::error::{GeniusError, GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::RemoteHost;
use crate::ui::{Console, redact_credentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    Pulled {
        /// Local changes were stashed and restored cleanly.
        stash_restored: bool,
    },
    /// Pulled, but the stashed changes did not re-apply cleanly. The stash
    /// entry is kept for manual resolution.
    RestoredWithConflicts,
    /// The operator declined to stash local changes.
    Declined,
}

/// Holds at most one auto-stash for the duration of an operation.
#[derive(Debug)]
pub struct StashSlot {
    prefix: String,
    held: Option<String>,
}

impl StashSlot {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            held: None,
        }
    }

    /// Label of the held stash, if any.
    #[must_use]
    pub fn held(&self) -> Option<&str> {
        self.held.as_deref()
    }

    /// Stash every local change (untracked files included) under a unique
    /// label.
    ///
    /// Returns `false` when git found nothing to stash; the slot stays empty.
    ///
    /// # Errors
    ///
    /// Returns `StashSlotOccupied` if a stash is already held, or
    /// `StashFailed` if git refuses.
    pub fn push<G: VcsGateway>(&mut self, git: &G, dir: &Path) -> GeniusResult<bool> {
        if self.held.is_some() {
            return Err(WorkflowError::StashSlotOccupied.into());
        }
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        let label = format!("{}-{seconds}", self.prefix);

        let before = git.stash_count(dir).unwrap_or(0);
        let out = git.run(dir, &["stash", "push", "--include-untracked", "-m", &label])?;
        if !out.success {
            return Err(WorkflowError::StashFailed {
                message: failure_text(&out),
            }
            .into());
        }
        // git said it saved something; an unreadable count keeps the slot held
        match git.stash_count(dir) {
            Ok(after) if after <= before => return Ok(false),
            Ok(_) => {}
            Err(e) => warn!(%label, error = %e, "stash count unavailable after push"),
        }
        info!(%label, "changes stashed");
        self.held = Some(label);
        Ok(true)
    }

    /// Pop the most recent stash if one is held.
    ///
    /// Returns `None` when nothing was held, otherwise whether the pop
    /// applied cleanly. The slot is empty afterwards either way.
    ///
    /// # Errors
    ///
    /// Returns an error only if git cannot be run.
    pub fn restore<G: VcsGateway>(&mut self, git: &G, dir: &Path) -> GeniusResult<Option<bool>> {
        let Some(label) = self.held.take() else {
            return Ok(None);
        };
        let out = git.run(dir, &["stash", "pop"])?;
        if out.success {
            info!(%label, "stash restored");
        } else {
            warn!(%label, error = %out.message(), "stash did not apply cleanly");
        }
        Ok(Some(out.success))
    }
}

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// Stash local changes if needed, pull, then restore them.
    ///
    /// # Errors
    ///
    /// Returns `StashFailed` when stashing fails (nothing was pulled) and
    /// `PullFailed` when the pull fails, after trying to restore the stash.
    pub fn smart_pull(&self) -> GeniusResult<PullOutcome> {
        let (mut config, dir) = self.begin();
        let _span = operation_span("smart-pull", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        self.reconcile(&mut config, &dir)?;

        let mut slot = StashSlot::new(&self.session.settings.workflow.auto_stash_label);
        if self.git.is_dirty(&dir)? {
            self.console.warn("Uncommitted changes detected");
            if !self
                .console
                .confirm("Auto-stash changes and continue pull?")
            {
                self.console.warn("Smart pull cancelled");
                return Ok(PullOutcome::Declined);
            }
            match slot.push(self.git, &dir) {
                Ok(true) => self.console.success("Changes stashed temporarily"),
                Ok(false) => self.console.info("Nothing needed stashing"),
                Err(e) => return Err(self.fail("git stash push", e)),
            }
        }

        let remote = config.remote_name.clone();
        let branch = config.branch.clone();
        let command = format!("git pull {remote} {branch}");
        self.console.info("Pulling latest changes...");
        let out = match self.run_remote(&dir, &["pull", &remote, &branch]) {
            Ok(out) if out.success => out,
            failed => {
                let message = match failed {
                    Ok(out) => failure_text(&out),
                    Err(e) => redact_credentials(&e.to_string()).into_owned(),
                };
                return Err(self.pull_failed(&mut slot, &dir, &command, remote, branch, message));
            }
        };
        self.console.output(&out.stdout);

        let restored = slot
            .restore(self.git, &dir)
            .map_err(|e| self.fail("git stash pop", e))?;
        match restored {
            None => {
                self.console.success("Smart pull completed successfully");
                Ok(PullOutcome::Pulled {
                    stash_restored: false,
                })
            }
            Some(true) => {
                self.console.success("Stashed changes restored");
                self.console.success("Smart pull completed successfully");
                Ok(PullOutcome::Pulled {
                    stash_restored: true,
                })
            }
            Some(false) => {
                self.console
                    .warn("Auto-stash could not be applied cleanly");
                self.console.info("Resolve conflicts manually if needed");
                Ok(PullOutcome::RestoredWithConflicts)
            }
        }
    }

    /// Give back the held stash after a failed pull and build the audited
    /// `PullFailed`.
    fn pull_failed(
        &self,
        slot: &mut StashSlot,
        dir: &Path,
        command: &str,
        remote: String,
        branch: String,
        message: String,
    ) -> GeniusError {
        let stash_restored = match slot.restore(self.git, dir) {
            Ok(restored) => restored,
            Err(e) => {
                warn!(error = %e, "stash pop could not run");
                Some(false)
            }
        };
        if stash_restored == Some(false) {
            self.console
                .warn("Auto-stash could not be restored; it is still in the stash list");
        }
        self.fail(
            command,
            WorkflowError::PullFailed {
                remote,
                branch,
                message,
                stash_restored,
            },
        )
    }

    /// Plain `git pull <remote> <branch>`.
    ///
    /// # Errors
    ///
    /// Returns `PullFailed` when git fails.
    pub fn pull(&self) -> GeniusResult<()> {
        let (mut config, dir) = self.begin();
        let _span = operation_span("pull", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        self.reconcile(&mut config, &dir)?;

        let remote = config.remote_name.clone();
        let branch = self.working_branch(&dir, &config);
        let out = self
            .run_remote(&dir, &["pull", &remote, &branch])
            .map_err(|e| self.fail(&format!("git pull {remote} {branch}"), e))?;
        if !out.success {
            return Err(self.fail(
                &format!("git pull {remote} {branch}"),
                WorkflowError::PullFailed {
                    remote,
                    branch,
                    message: failure_text(&out),
                    stash_restored: None,
                },
            ));
        }
        self.console.output(&out.stdout);
        self.console.success("Pull completed");
        Ok(())
    }

    /// `git fetch --all`.
    ///
    /// # Errors
    ///
    /// Returns `StepFailed` when git fails.
    pub fn fetch(&self) -> GeniusResult<()> {
        let (config, dir) = self.begin();
        let _span = operation_span("fetch", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let out = self
            .run_remote(&dir, &["fetch", "--all"])
            .map_err(|e| self.fail("git fetch --all", e))?;
        if !out.success {
            return Err(self.fail(
                "git fetch --all",
                WorkflowError::StepFailed {
                    step: "fetch",
                    message: failure_text(&out),
                },
            ));
        }
        self.console.success("Fetched all remotes");
        Ok(())
    }

    /// Show `git status` for the project directory.
    ///
    /// # Errors
    ///
    /// Returns `StepFailed` when git fails.
    pub fn status(&self) -> GeniusResult<String> {
        let (config, dir) = self.begin();
        let _span = operation_span("status", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let out = self.git.run(&dir, &["status"])?;
        if !out.success {
            return Err(self.fail(
                "git status",
                WorkflowError::StepFailed {
                    step: "status",
                    message: failure_text(&out),
                },
            ));
        }
        self.console.output(&out.stdout);
        Ok(out.stdout)
    }
}
