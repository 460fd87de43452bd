// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Guided setup and project directory changes.
//!
//! ```text
//! setup:
//!   project dir ─► persist ─► repository ─► reconcile ─► git identity
//!     ─► branch/remote names ─► repository identity ─► token
//!     ─► hosted repository (check / create) ─► remote (token URL)
//!     ─► first push? ─► persist ─► summary
//! ```

use std::path::{Path, PathBuf};
use tracing::{Instrument, info, warn};

use super::{ReconcileOutcome, Workflow, failure_text};
use crate::error::{GeniusResult, WorkflowError};
use crate::git::VcsGateway;
use crate::logging::operation_span;
use crate::remote::{RemoteHost, RemoteIdentity};
use crate::state::WorkflowConfig;
use crate::state::workflow::resolve_directory;
use crate::ui::Console;

/// What a completed setup configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    pub project_directory: PathBuf,
    pub branch: String,
    pub remote: String,
    pub repository_url: String,
    pub pushed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDirOutcome {
    /// The new directory is a repository; the branch was reconciled.
    Repository(ReconcileOutcome),
    /// A repository was initialized in the new directory.
    Initialized,
    /// The new directory is not a repository and init was declined.
    NotRepository,
}

impl<G, C, H> Workflow<'_, G, C, H>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    /// Walk the operator through configuring everything in one go.
    ///
    /// Takes `&mut self` because a token entered here is used for the rest
    /// of the session.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step. State persisted by earlier steps is
    /// kept.
    pub async fn setup(&mut self) -> GeniusResult<SetupSummary> {
        let config = self.store.load();
        let span = operation_span("setup", self.store.invocation_dir());
        self.run_setup(config).instrument(span).await
    }

    async fn run_setup(&mut self, mut config: WorkflowConfig) -> GeniusResult<SetupSummary> {
        self.console.header("Git Genius Setup");

        self.select_project_directory(&mut config)?;
        self.store.save(&config)?;
        let dir = config.project_dir(self.store.invocation_dir());

        self.require_repository(&dir, &config.branch)?;
        self.reconcile(&mut config, &dir)?;
        self.ensure_git_identity(&dir)?;
        self.choose_branch_and_remote(&mut config, &dir)?;

        self.console.header("GitHub Repository");
        if config.repo_name.is_empty() {
            if let Some(name) = dir.file_name() {
                config.repo_name = name.to_string_lossy().into_owned();
            }
        }
        self.resolve_repository_identity(&mut config, None, None)?;
        let web_url = format!(
            "{}/{}/{}",
            self.host.web_url().trim_end_matches('/'),
            config.owner,
            config.repo_name
        );
        self.console.info(&format!("Target repository: {web_url}"));
        self.store.save(&config)?;

        self.console.header("GitHub Authentication");
        self.configure_token().await?;
        self.ensure_hosted_repository(&mut config).await?;

        let url = match &self.session.token {
            Some(token) => self
                .host
                .authenticated_url(token, &config.owner, &config.repo_name),
            None => self.host.repository_url(&config.owner, &config.repo_name),
        };
        self.replace_remote(&dir, &config.remote_name, &url)?;
        self.store.save(&config)?;

        let pushed = self.offer_first_push(&mut config, &dir)?;
        self.store.save(&config)?;

        let summary = SetupSummary {
            project_directory: dir,
            branch: config.branch.clone(),
            remote: config.remote_name.clone(),
            repository_url: web_url,
            pushed,
        };
        self.console.header("Setup Summary");
        self.console.success(&format!(
            "Project Dir : {}",
            summary.project_directory.display()
        ));
        self.console
            .success(&format!("Branch      : {}", summary.branch));
        self.console
            .success(&format!("Remote      : {}", summary.remote));
        self.console
            .success(&format!("Repository  : {}", summary.repository_url));
        self.console.success("Setup completed successfully");
        info!(branch = %summary.branch, remote = %summary.remote, "setup completed");
        Ok(summary)
    }

    /// Keep the current project directory or switch to another existing one.
    fn select_project_directory(&self, config: &mut WorkflowConfig) -> GeniusResult<()> {
        let invocation = self.store.invocation_dir();
        self.console
            .info(&format!("Current directory: {}", invocation.display()));
        if config.project_directory.is_empty() {
            config.project_directory = resolve_directory(invocation).display().to_string();
        }

        if !self
            .console
            .confirm("Do you want to use a DIFFERENT project directory?")
        {
            return Ok(());
        }
        let dir = self.read_directory(None, "Enter full path of project directory")?;
        self.console
            .success(&format!("Project directory set to: {}", dir.display()));
        config.project_directory = dir.display().to_string();
        Ok(())
    }

    /// Resolve `given` (or a prompted path) to an existing directory.
    fn read_directory(&self, given: Option<&str>, prompt: &str) -> GeniusResult<PathBuf> {
        let raw = self.value_or_prompt(given, prompt);
        if raw.is_empty() {
            return Err(WorkflowError::MissingInput {
                what: "directory path",
            }
            .into());
        }
        let path = Path::new(&raw);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.store.invocation_dir().join(path)
        };
        if !path.is_dir() {
            return Err(WorkflowError::InvalidDirectory { path: raw }.into());
        }
        Ok(resolve_directory(&path))
    }

    /// Local `user.name` and `user.email`, prompting for missing ones.
    fn ensure_git_identity(&self, dir: &Path) -> GeniusResult<()> {
        let name = self.git.config_get(dir, "user.name");
        let email = self.git.config_get(dir, "user.email");
        if name.is_some() && email.is_some() {
            self.console.success("Git identity already configured");
            return Ok(());
        }

        self.console.warn("Git identity not configured");
        self.console
            .info("Commits require user.name and user.email");
        if !self.console.confirm("Configure git identity now?") {
            return Err(WorkflowError::MissingInput {
                what: "git identity",
            }
            .into());
        }

        for (current, key, prompt, what) in [
            (name, "user.name", "Enter your name", "name"),
            (email, "user.email", "Enter your email", "email"),
        ] {
            if current.is_some() {
                continue;
            }
            let value = self.console.input(prompt);
            if value.is_empty() {
                return Err(WorkflowError::MissingInput { what }.into());
            }
            self.git
                .config_set(dir, key, &value)
                .map_err(|e| self.fail(&format!("git config {key}"), e))?;
        }
        self.console
            .success("Git identity configured (local repository)");
        Ok(())
    }

    /// Prompt for branch and remote names; empty answers keep the current ones.
    fn choose_branch_and_remote(&self, config: &mut WorkflowConfig, dir: &Path) -> GeniusResult<()> {
        let branch = self
            .console
            .input(&format!("Default branch [{}]", config.branch));
        if !branch.is_empty() && branch != config.branch {
            config.branch = branch;
            config.default_branch.clone_from(&config.branch);
            self.store.save(config)?;
            if self.git.has_commit(dir) {
                self.reconcile(config, dir)?;
            } else {
                self.point_head_at(dir, &config.branch);
            }
        }

        let remote = self
            .console
            .input(&format!("Remote name [{}]", config.remote_name));
        if !remote.is_empty() {
            config.remote_name = remote;
        }
        self.store.save(config)
    }

    /// Keep a stored token, or offer to store and validate a new one.
    async fn configure_token(&mut self) -> GeniusResult<()> {
        if self.session.token.is_some() {
            self.console.success("GitHub token already configured");
            return Ok(());
        }

        let web = self.host.web_url().trim_end_matches('/').to_string();
        self.console
            .info(&format!("Create a token at: {web}/settings/tokens"));
        self.console.info("Required scope: repo");
        if !self
            .console
            .confirm("Do you want to configure GitHub token now?")
        {
            self.console.warn("Skipping token setup");
            return Ok(());
        }

        let token = self.console.secret("Paste GitHub token");
        if token.is_empty() {
            return Err(WorkflowError::MissingInput { what: "token" }.into());
        }
        let credentials = self.credentials();
        credentials.save(&token)?;
        self.session.token = Some(token);

        match self.session.identity(self.host).await {
            Ok(RemoteIdentity::User { login }) => {
                self.console
                    .success(&format!("Authenticated as: {login}"));
                Ok(())
            }
            Ok(RemoteIdentity::Offline) => {
                self.console
                    .warn("Offline: token stored without validation");
                Ok(())
            }
            Err(e) => {
                credentials.delete();
                self.session.token = None;
                Err(self.fail(
                    "token validation failed",
                    WorkflowError::InvalidCredential {
                        message: e.to_string(),
                    },
                ))
            }
        }
    }

    /// Check the hosted repository, offering to create it. Offline sessions
    /// and missing tokens skip the check.
    async fn ensure_hosted_repository(&self, config: &mut WorkflowConfig) -> GeniusResult<()> {
        if !self.session.online {
            self.console.warn("Offline mode detected");
            self.console
                .info("Cannot verify or create GitHub repository while offline");
            return Ok(());
        }
        let Some(token) = self.session.token.clone() else {
            self.console
                .warn("No GitHub token; skipping repository check");
            return Ok(());
        };

        if self.check_remote_repository(&token, config).await? {
            self.console.success("GitHub repository exists");
            self.record_existing_ownership(&token, config).await;
            config.repo_created_remotely = true;
            return Ok(());
        }

        self.console.warn("GitHub repository does not exist");
        if !self.console.confirm("Create this repository on GitHub?") {
            return Ok(());
        }
        let private = self.console.confirm("Make repository PRIVATE?");
        self.create_remote_repository(&token, config, private).await
    }

    /// Offer to commit everything and push it.
    fn offer_first_push(&self, config: &mut WorkflowConfig, dir: &Path) -> GeniusResult<bool> {
        if !self.console.confirm("Push current code to GitHub now?") {
            return Ok(false);
        }
        let message = self.console.input("Initial commit message");
        let message = if message.is_empty() {
            self.session.settings.workflow.default_commit_message.clone()
        } else {
            message
        };

        self.commit_all(dir, &message, true)?;
        if !self.git.has_commit(dir) {
            warn!("nothing committed, skipping push");
            self.console.warn("Nothing to push yet");
            return Ok(false);
        }
        self.push_branch(config, dir)?;
        Ok(true)
    }

    /// Switch the project directory, then reconcile or offer init there.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` or `InvalidDirectory` for a bad path and
    /// `InitFailed` when git cannot initialize the directory.
    pub fn change_project_directory(&self, path: Option<&str>) -> GeniusResult<ChangeDirOutcome> {
        let (mut config, current) = self.begin();
        let _span = operation_span("chdir", &current).entered();

        self.console.header("Change Project Directory");
        self.console
            .info(&format!("Current project directory: {}", current.display()));

        let dir = self.read_directory(path, "Enter full path of NEW project directory")?;
        config.project_directory = dir.display().to_string();
        self.store.save(&config)?;
        self.console
            .success(&format!("Project directory updated: {}", dir.display()));

        if let Err(e) = self.git.ensure_safe_directory(&dir) {
            warn!(error = %e, "safe.directory not updated");
        }
        if self.git.is_repository(&dir) {
            self.console
                .success("Git repository detected in new directory");
            return self.reconcile(&mut config, &dir).map(ChangeDirOutcome::Repository);
        }

        self.console
            .warn("Selected directory is NOT a git repository");
        if !self.console.confirm("Initialize git repository here?") {
            self.console
                .warn("Git operations will be limited until repo is initialized");
            return Ok(ChangeDirOutcome::NotRepository);
        }

        let out = self.git.run(&dir, &["init"])?;
        if !out.success {
            return Err(self.fail(
                "git init",
                WorkflowError::InitFailed {
                    message: failure_text(&out),
                },
            ));
        }
        self.console.success("Git repository initialized");
        self.point_head_at(&dir, &config.branch);
        self.console
            .success(&format!("Branch prepared: {}", config.branch));
        Ok(ChangeDirOutcome::Initialized)
    }
}
