// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Manual stash handling and undo.

use tracing::info;

use super::{Workflow, failure_text};
use crate::error::{GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::RemoteHost;
use crate::ui::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The last commit was removed; its changes stay staged.
    Undone,
    NothingToDo,
    Declined,
}

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// `git stash push`, with `-m` when a message is given.
    ///
    /// # Errors
    ///
    /// Returns `StashFailed` when git refuses.
    pub fn stash_save(&self, message: Option<&str>) -> GeniusResult<()> {
        let (config, dir) = self.begin();
        let _span = operation_span("stash-save", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let mut args = vec!["stash", "push"];
        if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
            args.extend(["-m", message]);
        }
        let out = self.git.run(&dir, &args)?;
        if !out.success {
            return Err(self.fail(
                "git stash push",
                WorkflowError::StashFailed {
                    message: failure_text(&out),
                },
            ));
        }
        self.console.output(&out.stdout);
        self.console.success("Changes stashed");
        Ok(())
    }

    /// Print and return `git stash list`.
    ///
    /// # Errors
    ///
    /// Returns `StepFailed` when git fails.
    pub fn stash_list(&self) -> GeniusResult<String> {
        let (config, dir) = self.begin();
        let _span = operation_span("stash-list", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let out = self.git.run(&dir, &["stash", "list"])?;
        if !out.success {
            return Err(self.fail(
                "git stash list",
                WorkflowError::StepFailed {
                    step: "stash list",
                    message: failure_text(&out),
                },
            ));
        }
        if out.stdout.is_empty() {
            self.console.info("No stashes");
        } else {
            self.console.output(&out.stdout);
        }
        Ok(out.stdout)
    }

    /// `git stash pop`.
    ///
    /// # Errors
    ///
    /// Returns `StepFailed` when git cannot apply the stash.
    pub fn stash_pop(&self) -> GeniusResult<()> {
        let (config, dir) = self.begin();
        let _span = operation_span("stash-pop", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        let out = self.git.run(&dir, &["stash", "pop"])?;
        if !out.success {
            return Err(self.fail(
                "git stash pop",
                WorkflowError::StepFailed {
                    step: "stash pop",
                    message: failure_text(&out),
                },
            ));
        }
        self.console.output(&out.stdout);
        self.console.success("Stash applied");
        Ok(())
    }

    /// Remove the last commit, keeping its changes staged.
    ///
    /// The root commit has no parent to reset to, so its branch ref is
    /// deleted instead; the index is untouched either way.
    ///
    /// # Errors
    ///
    /// Returns `StepFailed` when git refuses the reset.
    pub fn undo_last_commit(&self) -> GeniusResult<UndoOutcome> {
        let (config, dir) = self.begin();
        let _span = operation_span("undo", &dir).entered();

        self.require_repository(&dir, &config.branch)?;
        if !self.git.has_commit(&dir) {
            self.console.warn("No commits to undo");
            return Ok(UndoOutcome::NothingToDo);
        }
        if !self
            .console
            .confirm("Undo last commit? (changes will be kept)")
        {
            return Ok(UndoOutcome::Declined);
        }

        let has_parent = self
            .git
            .run(&dir, &["rev-parse", "--verify", "--quiet", "HEAD~1"])?
            .success;
        let args: &[&str] = if has_parent {
            &["reset", "--soft", "HEAD~1"]
        } else {
            &["update-ref", "-d", "HEAD"]
        };
        let out = self.git.run(&dir, args)?;
        if !out.success {
            return Err(self.fail(
                &format!("git {}", args.join(" ")),
                WorkflowError::StepFailed {
                    step: "undo",
                    message: failure_text(&out),
                },
            ));
        }

        info!(root = !has_parent, "last commit undone");
        self.console.success("Last commit undone");
        Ok(UndoOutcome::Undone)
    }
}
