// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch and remote switching.

use tracing::info;

use super::{Workflow, failure_text};
use crate::error::{GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::RemoteHost;
use crate::ui::Console;

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// `git checkout -B <name>` and record it as the configured branch.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` for an empty name and `StepFailed` when git
    /// refuses the checkout.
    pub fn switch_branch(&self, name: Option<&str>) -> GeniusResult<String> {
        let (mut config, dir) = self.begin();
        let _span = operation_span("switch-branch", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let branch = self.value_or_prompt(name, "Branch name");
        if branch.is_empty() {
            return Err(WorkflowError::MissingInput {
                what: "branch name",
            }
            .into());
        }

        let out = self.git.run(&dir, &["checkout", "-B", &branch])?;
        if !out.success {
            return Err(self.fail(
                &format!("git checkout -B {branch}"),
                WorkflowError::StepFailed {
                    step: "checkout",
                    message: failure_text(&out),
                },
            ));
        }

        config.branch.clone_from(&branch);
        self.store.save(&config)?;
        info!(%branch, "switched branch");
        self.console
            .success(&format!("Switched to branch: {branch}"));
        Ok(branch)
    }

    /// Point `name` at `url` (replacing it) and make it the configured remote.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` for an empty name or URL and `StepFailed`
    /// when git cannot add the remote.
    pub fn switch_remote(&self, name: Option<&str>, url: Option<&str>) -> GeniusResult<String> {
        let (mut config, dir) = self.begin();
        let _span = operation_span("switch-remote", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let remote = self.value_or_prompt(name, "Remote name");
        if remote.is_empty() {
            return Err(WorkflowError::MissingInput {
                what: "remote name",
            }
            .into());
        }
        let url = self.value_or_prompt(url, "Remote URL");
        if url.is_empty() {
            return Err(WorkflowError::MissingInput { what: "remote URL" }.into());
        }

        self.replace_remote(&dir, &remote, &url)?;
        config.remote_name.clone_from(&remote);
        self.store.save(&config)?;
        info!(%remote, "switched remote");
        self.console
            .success(&format!("Remote switched to: {remote}"));
        Ok(remote)
    }
}
