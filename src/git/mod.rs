// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git gateway.
//!
//! ```text
//! VcsGateway (trait)
//!   run(dir, args) ──► GitOutput { success, stdout, stderr }
//!   run_remote(dir, args, credential)   push / pull / fetch
//!   │
//!   ├─ queries:   is_repository, has_commit, is_dirty, current_branch,
//!   │             remote_url, config_get, stash_count, observe
//!   └─ mutations: config_set, ensure_safe_directory, run_checked
//!
//! ShellGateway ──► git CLI (std::process::Command)
//! ```
//!
//! Every call names its working directory explicitly. A non-zero exit is
//! data in [`GitOutput`]; only a spawn failure is an error from [`VcsGateway::run`].

mod shell;


use std::fmt;
use std::path::Path;

use crate::error::{GeniusResult, GitError};

pub use shell::ShellGateway;

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    #[must_use]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[must_use]
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// The most useful text for a failure report: stderr, else stdout.
    #[must_use]
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Repository state as git reports it right now. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedRepoState {
    pub is_repository: bool,
    /// Empty when there are no commits yet or HEAD is detached.
    pub current_branch: String,
    pub working_tree_dirty: bool,
    pub has_any_commit: bool,
    pub remote_url: Option<String>,
}

/// Hosting token offered to git when a remote under `host` asks for one.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RemoteCredential<'a> {
    /// Web base URL the credential is scoped to, e.g. `https://github.com`.
    pub host: &'a str,
    pub token: &'a str,
}

impl fmt::Debug for RemoteCredential<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteCredential")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Narrow contract to the external version-control tool.
pub trait VcsGateway {
    /// Run `git <args>` in `dir`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be located or started.
    fn run(&self, dir: &Path, args: &[&str]) -> GeniusResult<GitOutput>;

    /// Run a command that talks to a remote (push, pull, fetch).
    ///
    /// With a `credential`, git authenticates with the token instead of
    /// asking. Gateways that cannot authenticate just run the command.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if git cannot be located or started.
    fn run_remote(
        &self,
        dir: &Path,
        args: &[&str],
        credential: Option<RemoteCredential<'_>>,
    ) -> GeniusResult<GitOutput> {
        let _ = credential;
        self.run(dir, args)
    }

    /// `git --version`, `None` when git is unusable.
    fn version(&self) -> Option<String> {
        self.run(&std::env::temp_dir(), &["--version"])
            .ok()
            .filter(|out| out.success)
            .map(|out| out.stdout)
    }

    /// Run and require a zero exit status, returning stdout.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` carrying git's message on a non-zero exit.
    fn run_checked(&self, dir: &Path, args: &[&str]) -> GeniusResult<String> {
        let out = self.run(dir, args)?;
        if out.success {
            Ok(out.stdout)
        } else {
            Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: out.message().to_string(),
            }
            .into())
        }
    }

    fn is_repository(&self, dir: &Path) -> bool {
        self.run(dir, &["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out.success && out.stdout == "true")
    }

    fn has_commit(&self, dir: &Path) -> bool {
        self.run(dir, &["log", "-1"]).is_ok_and(|out| out.success)
    }

    /// Any staged, unstaged or untracked change.
    ///
    /// # Errors
    ///
    /// Returns an error if `git status` fails.
    fn is_dirty(&self, dir: &Path) -> GeniusResult<bool> {
        Ok(!self.run_checked(dir, &["status", "--porcelain"])?.is_empty())
    }

    /// Current branch name, empty when unknown.
    fn current_branch(&self, dir: &Path) -> String {
        self.run(dir, &["branch", "--show-current"])
            .ok()
            .filter(|out| out.success)
            .map(|out| out.stdout)
            .unwrap_or_default()
    }

    fn remote_url(&self, dir: &Path, remote: &str) -> Option<String> {
        self.run(dir, &["remote", "get-url", remote])
            .ok()
            .filter(|out| out.success && !out.stdout.is_empty())
            .map(|out| out.stdout)
    }

    fn config_get(&self, dir: &Path, key: &str) -> Option<String> {
        self.run(dir, &["config", "--get", key])
            .ok()
            .filter(|out| out.success && !out.stdout.is_empty())
            .map(|out| out.stdout)
    }

    /// # Errors
    ///
    /// Returns an error if git rejects the key or value.
    fn config_set(&self, dir: &Path, key: &str, value: &str) -> GeniusResult<()> {
        self.run_checked(dir, &["config", key, value]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if `git stash list` fails.
    fn stash_count(&self, dir: &Path) -> GeniusResult<usize> {
        Ok(self
            .run_checked(dir, &["stash", "list"])?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count())
    }

    /// Snapshot of `dir` with the URL of `remote`.
    ///
    /// # Errors
    ///
    /// Returns an error if the working tree status cannot be read.
    fn observe(&self, dir: &Path, remote: &str) -> GeniusResult<ObservedRepoState> {
        if !self.is_repository(dir) {
            return Ok(ObservedRepoState::default());
        }
        Ok(ObservedRepoState {
            is_repository: true,
            current_branch: self.current_branch(dir),
            working_tree_dirty: self.is_dirty(dir)?,
            has_any_commit: self.has_commit(dir),
            remote_url: self.remote_url(dir, remote),
        })
    }

    /// Add `dir` to the global `safe.directory` list unless already allowed.
    ///
    /// Returns `true` when an entry was added.
    ///
    /// # Errors
    ///
    /// Returns an error if the global config cannot be written.
    fn ensure_safe_directory(&self, dir: &Path) -> GeniusResult<bool> {
        let wanted = dir.display().to_string();
        let listed = self.run(dir, &["config", "--global", "--get-all", "safe.directory"])?;
        let allowed = listed.success
            && listed
                .stdout
                .lines()
                .map(str::trim)
                .any(|entry| entry == wanted || entry == "*");
        if allowed {
            return Ok(false);
        }
        self.run_checked(dir, &["config", "--global", "--add", "safe.directory", &wanted])?;
        Ok(true)
    }
}
