// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workflow orchestration.
//!
//! ```text
//!              ┌──────────────── Workflow ────────────────┐
//! Console ◄────┤ push | smart_pull | create_or_link | ...  ├────► RemoteHost
//!              │        │                                  │
//!              │        ▼                                  │
//!              │   reconcile ──► StateStore (load / save)  │
//!              └────────┬─────────────────────────────────┘
//!                       ▼
//!                  VcsGateway
//! ```
//!
//! Every top-level operation reloads the [`WorkflowConfig`] from disk, binds
//! all git calls to its project directory and persists right after each
//! state-changing decision. Declined prompts are `Ok` outcomes; failures of
//! git or the hosting API are recorded in the audit log before being returned.

mod branch;
mod link;
mod pull;
mod push;
mod reconcile;
mod session;
mod setup;
mod stash;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{GeniusError, GeniusResult, WorkflowError};
use crate::git::{GitOutput, RemoteCredential, VcsGateway};
use crate::remote::RemoteHost;
use crate::state::{AuditLog, CredentialStore, StateStore, WorkflowConfig};
use crate::ui::{Console, redact_credentials};

pub use link::LinkOutcome;
pub use pull::{PullOutcome, StashSlot};
pub use push::PushOutcome;
pub use reconcile::ReconcileOutcome;
pub use session::SessionContext;
pub use setup::{ChangeDirOutcome, SetupSummary};
pub use stash::UndoOutcome;

/// Git's complaint, with any credential in a URL masked.
fn failure_text(out: &GitOutput) -> String {
    redact_credentials(out.message()).into_owned()
}

/// Result of making sure the project directory is a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepoGate {
    Ready,
    Initialized,
    Declined,
}

/// Orchestrates one operator request against git, the hosting API and the
/// persisted state.
pub struct Workflow<'a, G, C, H> {
    git: &'a G,
    console: &'a C,
    host: &'a H,
    store: &'a StateStore,
    session: SessionContext,
}

impl<'a, G, C, H> Workflow<'a, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    #[must_use]
    pub fn new(
        git: &'a G,
        console: &'a C,
        host: &'a H,
        store: &'a StateStore,
        session: SessionContext,
    ) -> Self {
        Self {
            git,
            console,
            host,
            store,
            session,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    fn credentials(&self) -> CredentialStore {
        CredentialStore::new(self.store.control().clone())
    }

    fn audit(&self) -> AuditLog {
        AuditLog::new(self.store.control().clone())
    }

    /// Fresh configuration and the directory it points at.
    fn begin(&self) -> (WorkflowConfig, PathBuf) {
        let config = self.store.load();
        let dir = config.project_dir(self.store.invocation_dir());
        (config, dir)
    }

    /// Record `err` in the audit log when it is a tool or API failure.
    fn fail(&self, context: &str, err: impl Into<GeniusError>) -> GeniusError {
        let err = err.into();
        let message = redact_credentials(&err.to_string()).into_owned();
        if err.is_auditable() {
            self.audit().record(context, &message);
        }
        warn!(context, error = %message, "operation failed");
        err
    }

    /// Run a git command that talks to a remote, offering the session token
    /// for the hosting service's URLs.
    fn run_remote(&self, dir: &Path, args: &[&str]) -> GeniusResult<GitOutput> {
        let credential = self.session.token.as_deref().map(|token| RemoteCredential {
            host: self.host.web_url(),
            token,
        });
        self.git.run_remote(dir, args, credential)
    }

    /// Make sure `dir` is a repository, offering to initialize one.
    ///
    /// A fresh repository gets its unborn HEAD pointed at `branch`.
    fn ensure_repository(&self, dir: &Path, branch: &str) -> GeniusResult<RepoGate> {
        if !dir.is_dir() {
            return Err(WorkflowError::InvalidDirectory {
                path: dir.display().to_string(),
            }
            .into());
        }
        if let Err(e) = self.git.ensure_safe_directory(dir) {
            debug!(error = %e, "safe.directory not updated");
        }
        if self.git.is_repository(dir) {
            return Ok(RepoGate::Ready);
        }

        self.console
            .warn("Selected directory is not a git repository");
        if !self
            .console
            .confirm("Do you want to initialize a git repository here?")
        {
            return Ok(RepoGate::Declined);
        }

        let out = self.git.run(dir, &["init"])?;
        if !out.success {
            return Err(self.fail(
                "git init",
                WorkflowError::InitFailed {
                    message: failure_text(&out),
                },
            ));
        }
        self.point_head_at(dir, branch);
        self.console.success("Git repository initialized");
        Ok(RepoGate::Initialized)
    }

    /// Like [`Self::ensure_repository`], treating a declined init as a
    /// precondition failure.
    fn require_repository(&self, dir: &Path, branch: &str) -> GeniusResult<()> {
        match self.ensure_repository(dir, branch)? {
            RepoGate::Declined => Err(WorkflowError::RepositoryRequired {
                path: dir.display().to_string(),
            }
            .into()),
            RepoGate::Ready | RepoGate::Initialized => Ok(()),
        }
    }

    /// Point an unborn HEAD at `branch` so the first commit lands there.
    fn point_head_at(&self, dir: &Path, branch: &str) {
        let reference = format!("refs/heads/{branch}");
        match self.git.run(dir, &["symbolic-ref", "HEAD", &reference]) {
            Ok(out) if out.success => debug!(branch, "HEAD prepared"),
            Ok(out) => warn!(branch, error = %out.message(), "could not prepare branch"),
            Err(e) => warn!(branch, error = %e, "could not prepare branch"),
        }
    }

    /// Point `name` at `url`, replacing any existing remote of that name.
    fn replace_remote(&self, dir: &Path, name: &str, url: &str) -> GeniusResult<()> {
        let removed = self.git.run(dir, &["remote", "remove", name])?;
        if !removed.success {
            debug!(remote = name, "no previous remote to remove");
        }
        let added = self.git.run(dir, &["remote", "add", name, url])?;
        if added.success {
            return Ok(());
        }
        Err(self.fail(
            "git remote add",
            WorkflowError::StepFailed {
                step: "remote add",
                message: failure_text(&added),
            },
        ))
    }

    /// Branch to operate on: the checked-out one, else the configured one.
    fn working_branch(&self, dir: &Path, config: &WorkflowConfig) -> String {
        let current = self.git.current_branch(dir);
        if current.is_empty() {
            config.branch.clone()
        } else {
            current
        }
    }

    /// Value from `given`, else from a prompt. Blank counts as missing.
    fn value_or_prompt(&self, given: Option<&str>, prompt: &str) -> String {
        match given.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => value.to_string(),
            None => self.console.input(prompt),
        }
    }
}
