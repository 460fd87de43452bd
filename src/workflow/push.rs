// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Guarded push.
//!
//! ```text
//! NoRepo ──(init?)──► NoCommit ──► FirstCommit ──┬──► NoRemote  (warn, done)
//!                                                └──► push
//! HasCommit ──clean──► NothingToCommit
//!           ──dirty──► Committed ──► push ──► Pushed | PushFailed
//! ```

use std::path::Path;
use tracing::info;

use super::{RepoGate, Workflow, failure_text};
use crate::error::{GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::RemoteHost;
use crate::state::WorkflowConfig;
use crate::ui::Console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed { remote: String, branch: String },
    /// A commit was made but no remote is configured to push to.
    CommittedWithoutRemote,
    /// Commits exist and the tree is clean.
    NothingToCommit,
    /// The operator declined to initialize a repository.
    Declined,
}

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// Commit pending changes and push them to the configured remote.
    ///
    /// Without `message`, the first commit uses the configured default and
    /// later commits prompt for one.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` for an empty message on a non-initial commit,
    /// `CommitFailed` or `PushFailed` when git fails. A failed push keeps the
    /// local commit.
    pub fn push(&self, message: Option<&str>) -> GeniusResult<PushOutcome> {
        let (mut config, dir) = self.begin();
        let _span = operation_span("push", &dir).entered();

        if self.ensure_repository(&dir, &config.branch)? == RepoGate::Declined {
            self.console.warn("Push cancelled");
            return Ok(PushOutcome::Declined);
        }
        self.reconcile(&mut config, &dir)?;

        let observed = self.git.observe(&dir, &config.remote_name)?;
        if observed.has_any_commit {
            if !observed.working_tree_dirty {
                self.console.warn("Nothing to commit");
                return Ok(PushOutcome::NothingToCommit);
            }
            let message = self.value_or_prompt(message, "Commit message");
            if message.is_empty() {
                return Err(WorkflowError::MissingInput {
                    what: "commit message",
                }
                .into());
            }
            self.commit_all(&dir, &message, true)?;
        } else {
            let message = message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(&self.session.settings.workflow.default_commit_message)
                .to_string();
            self.console.info("Creating first commit");
            self.commit_all(&dir, &message, false)?;
            self.console.success("Initial commit created");
        }

        if observed.remote_url.is_none() {
            self.console.warn("No remote configured");
            self.console
                .info("Run: genius link (Tools → Create / Link GitHub Repository)");
            return Ok(PushOutcome::CommittedWithoutRemote);
        }

        self.push_branch(&mut config, &dir)
    }

    /// `git add .` then `git commit -m`.
    ///
    /// With `tolerate_empty`, a "nothing to commit" refusal is not an error.
    pub(super) fn commit_all(
        &self,
        dir: &Path,
        message: &str,
        tolerate_empty: bool,
    ) -> GeniusResult<()> {
        let staged = self.git.run(dir, &["add", "."])?;
        if !staged.success {
            return Err(self.fail(
                "git add .",
                WorkflowError::CommitFailed {
                    message: failure_text(&staged),
                },
            ));
        }

        let committed = self.git.run(dir, &["commit", "-m", message])?;
        if committed.success {
            info!(message, "committed");
            return Ok(());
        }
        let nothing_to_commit = committed.stdout.contains("nothing to commit")
            || committed.stderr.contains("nothing to commit");
        if tolerate_empty && nothing_to_commit {
            return Ok(());
        }
        Err(self.fail(
            "git commit",
            WorkflowError::CommitFailed {
                message: failure_text(&committed),
            },
        ))
    }

    /// Push the working branch and record the first successful push.
    pub(super) fn push_branch(
        &self,
        config: &mut WorkflowConfig,
        dir: &Path,
    ) -> GeniusResult<PushOutcome> {
        let branch = self.working_branch(dir, config);
        let remote = config.remote_name.clone();
        info!(%remote, %branch, "pushing");

        let command = format!("git push -u {remote} {branch}");
        let out = self
            .run_remote(dir, &["push", "-u", &remote, &branch])
            .map_err(|e| self.fail(&command, e))?;
        if !out.success {
            return Err(self.fail(
                &command,
                WorkflowError::PushFailed {
                    remote,
                    branch,
                    message: failure_text(&out),
                },
            ));
        }

        config.first_push_completed = true;
        self.store.save(config)?;
        self.console.success("Changes pushed successfully");
        Ok(PushOutcome::Pushed { remote, branch })
    }
}
