// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Health auditor.
//!
//! ```text
//! Check::ALL ──► evaluate(check) ──► CheckReport { verdict, detail, hint }
//!   GitInstalled        fail
//!   ProjectDirectory    fail
//!   Repository          warn
//!   Branch              warn
//!   Identity            warn
//!   Remote              warn
//!   Connectivity        warn
//!   Token               warn | fail (rejected)
//!   RemoteRepository    warn
//!   ErrorLog            warn
//! ```
//!
//! Every check runs regardless of earlier verdicts. The auditor only reads:
//! it never prompts, initializes or writes state.


use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{Instrument, debug};

use crate::error::{GeniusError, RemoteError};
use crate::git::{ObservedRepoState, VcsGateway};
use crate::logging::operation_span;
use crate::remote::{RemoteHost, RemoteIdentity};
use crate::state::{AuditLog, StateStore, WorkflowConfig};
use crate::ui::{Console, redact_credentials};
use crate::workflow::SessionContext;

/// One check of the environment, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    GitInstalled,
    ProjectDirectory,
    Repository,
    Branch,
    Identity,
    Remote,
    Connectivity,
    Token,
    RemoteRepository,
    ErrorLog,
}

impl Check {
    pub const ALL: [Self; 10] = [
        Self::GitInstalled,
        Self::ProjectDirectory,
        Self::Repository,
        Self::Branch,
        Self::Identity,
        Self::Remote,
        Self::Connectivity,
        Self::Token,
        Self::RemoteRepository,
        Self::ErrorLog,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GitInstalled => "git",
            Self::ProjectDirectory => "project directory",
            Self::Repository => "repository",
            Self::Branch => "branch",
            Self::Identity => "identity",
            Self::Remote => "remote",
            Self::Connectivity => "connectivity",
            Self::Token => "token",
            Self::RemoteRepository => "github repository",
            Self::ErrorLog => "error log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Fail => "fail",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub check: Check,
    pub verdict: Verdict,
    pub detail: String,
    /// What the operator can do about a warning or failure.
    pub hint: Option<String>,
}

impl CheckReport {
    fn pass(check: Check, detail: impl Into<String>) -> Self {
        Self {
            check,
            verdict: Verdict::Pass,
            detail: detail.into(),
            hint: None,
        }
    }

    fn warn(check: Check, detail: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            check,
            verdict: Verdict::Warn,
            detail: detail.into(),
            hint: hint.map(str::to_string),
        }
    }

    fn fail(check: Check, detail: impl Into<String>, hint: &str) -> Self {
        Self {
            check,
            verdict: Verdict::Fail,
            detail: detail.into(),
            hint: Some(hint.to_string()),
        }
    }
}

/// All reports of one run, in [`Check::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub reports: Vec<CheckReport>,
}

impl AuditReport {
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.reports.iter().filter(|r| r.verdict == verdict).count()
    }

    /// No failures. Warnings are allowed.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.count(Verdict::Fail) == 0
    }

    #[must_use]
    pub fn get(&self, check: Check) -> Option<&CheckReport> {
        self.reports.iter().find(|r| r.check == check)
    }

    /// Print every report, hints included, then a one-line summary.
    pub fn render<C: Console>(&self, console: &C) {
        console.header("Genius Doctor");
        for report in &self.reports {
            match report.verdict {
                Verdict::Pass => console.success(&report.detail),
                Verdict::Warn => console.warn(&report.detail),
                Verdict::Fail => console.error(&report.detail),
            }
            if let Some(hint) = &report.hint {
                console.info(&format!("  → {hint}"));
            }
        }

        let summary = format!(
            "{} passed, {} warnings, {} failed",
            self.count(Verdict::Pass),
            self.count(Verdict::Warn),
            self.count(Verdict::Fail)
        );
        if self.is_healthy() {
            console.success(&summary);
        } else {
            console.error(&summary);
        }
    }
}

/// Runs the ordered checks against one project.
pub struct Doctor<'a, G, H> {
    git: &'a G,
    host: &'a H,
    store: &'a StateStore,
    session: &'a SessionContext,
}

/// Facts gathered once and shared by all checks.
struct Snapshot {
    config: WorkflowConfig,
    dir: PathBuf,
    observed: ObservedRepoState,
}

impl<'a, G, H> Doctor<'a, G, H>
where
    G: VcsGateway,
    H: RemoteHost,
{
    #[must_use]
    pub const fn new(
        git: &'a G,
        host: &'a H,
        store: &'a StateStore,
        session: &'a SessionContext,
    ) -> Self {
        Self {
            git,
            host,
            store,
            session,
        }
    }

    /// Evaluate every check in order.
    pub async fn run(&self) -> AuditReport {
        let config = self.store.load();
        let dir = config.project_dir(self.store.invocation_dir());
        let span = operation_span("doctor", &dir);
        let observed = if dir.is_dir() {
            self.git
                .observe(&dir, &config.remote_name)
                .unwrap_or_else(|e| {
                    debug!(error = %e, "repository state unavailable");
                    ObservedRepoState::default()
                })
        } else {
            ObservedRepoState::default()
        };
        let snapshot = Snapshot {
            config,
            dir,
            observed,
        };

        async {
            let mut report = AuditReport::default();
            for check in Check::ALL {
                let outcome = self.evaluate(check, &snapshot).await;
                debug!(check = check.name(), verdict = %outcome.verdict, "check evaluated");
                report.reports.push(outcome);
            }
            report
        }
        .instrument(span)
        .await
    }

    async fn evaluate(&self, check: Check, snapshot: &Snapshot) -> CheckReport {
        match check {
            Check::GitInstalled => self.git_installed(),
            Check::ProjectDirectory => Self::project_directory(&snapshot.dir),
            Check::Repository => Self::repository(&snapshot.observed),
            Check::Branch => Self::branch(snapshot),
            Check::Identity => self.identity(&snapshot.dir),
            Check::Remote => Self::remote(snapshot),
            Check::Connectivity => self.connectivity(),
            Check::Token => self.token().await,
            Check::RemoteRepository => self.remote_repository(&snapshot.config).await,
            Check::ErrorLog => self.error_log(),
        }
    }

    fn git_installed(&self) -> CheckReport {
        match self.git.version() {
            Some(version) => {
                CheckReport::pass(Check::GitInstalled, format!("Git installed ({version})"))
            }
            None => CheckReport::fail(
                Check::GitInstalled,
                "Git is not installed",
                "Install git and make sure it is on PATH",
            ),
        }
    }

    fn project_directory(dir: &Path) -> CheckReport {
        if dir.is_dir() {
            CheckReport::pass(
                Check::ProjectDirectory,
                format!("Project directory: {}", dir.display()),
            )
        } else {
            CheckReport::fail(
                Check::ProjectDirectory,
                format!("Invalid project directory: {}", dir.display()),
                "Run: genius chdir",
            )
        }
    }

    fn repository(observed: &ObservedRepoState) -> CheckReport {
        if observed.is_repository {
            CheckReport::pass(Check::Repository, "Git repository detected")
        } else {
            CheckReport::warn(
                Check::Repository,
                "Not a git repository",
                Some("Run: genius setup (or git init)"),
            )
        }
    }

    fn branch(snapshot: &Snapshot) -> CheckReport {
        let observed = &snapshot.observed;
        let configured = &snapshot.config.branch;
        if !observed.has_any_commit {
            return CheckReport::warn(Check::Branch, "No commits yet", None);
        }
        let current = &observed.current_branch;
        if current.is_empty() || current == configured {
            return CheckReport::pass(Check::Branch, format!("Branch: {configured}"));
        }
        CheckReport::warn(
            Check::Branch,
            format!("Branch mismatch detected (config: {configured}, git: {current})"),
            Some("Any git operation offers to reconcile it"),
        )
    }

    fn identity(&self, dir: &Path) -> CheckReport {
        let name = self.git.config_get(dir, "user.name");
        let email = self.git.config_get(dir, "user.email");
        match (name, email) {
            (Some(name), Some(email)) => {
                CheckReport::pass(Check::Identity, format!("Git identity: {name} <{email}>"))
            }
            _ => CheckReport::warn(
                Check::Identity,
                "Git identity not configured",
                Some("Run: genius setup"),
            ),
        }
    }

    fn remote(snapshot: &Snapshot) -> CheckReport {
        let name = &snapshot.config.remote_name;
        match &snapshot.observed.remote_url {
            Some(url) => CheckReport::pass(
                Check::Remote,
                format!("Remote {name}: {}", redact_credentials(url)),
            ),
            None => CheckReport::warn(
                Check::Remote,
                format!("Remote '{name}' not configured"),
                Some("Run: genius link"),
            ),
        }
    }

    fn connectivity(&self) -> CheckReport {
        if self.session.online {
            CheckReport::pass(Check::Connectivity, "Internet connection available")
        } else {
            CheckReport::warn(Check::Connectivity, "Offline mode detected", None)
        }
    }

    async fn token(&self) -> CheckReport {
        if self.session.token.is_none() {
            return CheckReport::warn(
                Check::Token,
                "GitHub token not configured",
                Some("Run: genius setup"),
            );
        }
        match self.session.identity(self.host).await {
            Ok(RemoteIdentity::User { login }) => {
                CheckReport::pass(Check::Token, format!("GitHub token valid ({login})"))
            }
            Ok(RemoteIdentity::Offline) => {
                CheckReport::warn(Check::Token, "Token not validated (offline)", None)
            }
            Err(e) if is_rejection(&e) => CheckReport::fail(
                Check::Token,
                "GitHub token invalid or expired",
                "Run: genius setup to store a new token",
            ),
            Err(e) => CheckReport::warn(
                Check::Token,
                format!("Unable to validate token: {e}"),
                None,
            ),
        }
    }

    async fn remote_repository(&self, config: &WorkflowConfig) -> CheckReport {
        if !config.has_repository_identity() {
            return CheckReport::warn(
                Check::RemoteRepository,
                "Repository owner/name not configured",
                Some("Run: genius setup"),
            );
        }
        if !self.session.online {
            return CheckReport::warn(
                Check::RemoteRepository,
                "Offline: GitHub repository not checked",
                None,
            );
        }
        let Some(token) = self.session.token.as_deref() else {
            return CheckReport::warn(
                Check::RemoteRepository,
                "No token: GitHub repository not checked",
                Some("Run: genius setup"),
            );
        };

        let full_name = format!("{}/{}", config.owner, config.repo_name);
        match self
            .host
            .repository_exists(token, &config.owner, &config.repo_name)
            .await
        {
            Ok(true) => CheckReport::pass(
                Check::RemoteRepository,
                format!("GitHub repository exists: {full_name}"),
            ),
            Ok(false) => CheckReport::warn(
                Check::RemoteRepository,
                format!("GitHub repository not found: {full_name}"),
                Some("Run: genius link"),
            ),
            Err(e) => CheckReport::warn(
                Check::RemoteRepository,
                format!("Unable to check GitHub repository: {e}"),
                None,
            ),
        }
    }

    fn error_log(&self) -> CheckReport {
        let log = AuditLog::new(self.store.control().clone());
        if log.exists() {
            CheckReport::warn(
                Check::ErrorLog,
                format!("Error log present: {}", log.path().display()),
                Some("Review it, then delete it once resolved"),
            )
        } else {
            CheckReport::pass(Check::ErrorLog, "No errors logged")
        }
    }
}

/// The host refused the credential itself, as opposed to being unreachable.
fn is_rejection(err: &GeniusError) -> bool {
    matches!(err, GeniusError::Remote(remote) if matches!(**remote, RemoteError::Unauthorized { .. }))
}
