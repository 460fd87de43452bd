// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The durable intent record.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Branch used when nothing else is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Remote used when nothing else is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// What the operator declared they want: branch, remote and hosted
/// repository identity, plus the project directory to operate on.
///
/// The JSON keys are kept stable for existing state files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub branch: String,
    pub default_branch: String,
    #[serde(rename = "remote")]
    pub remote_name: String,

    /// Username or organisation owning the hosted repository.
    pub owner: String,
    #[serde(rename = "repo")]
    pub repo_name: String,
    #[serde(rename = "is_org_repo")]
    pub is_organization_owner: bool,
    /// Organisation the repository was created under, empty otherwise.
    pub org_name: String,
    pub private_repo: bool,
    #[serde(rename = "repo_created")]
    pub repo_created_remotely: bool,

    #[serde(rename = "first_push_done")]
    pub first_push_completed: bool,

    /// Empty means "the directory the tool was started from".
    #[serde(rename = "work_dir")]
    pub project_directory: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            remote_name: DEFAULT_REMOTE.to_string(),
            owner: String::new(),
            repo_name: String::new(),
            is_organization_owner: false,
            org_name: String::new(),
            private_repo: false,
            repo_created_remotely: false,
            first_push_completed: false,
            project_directory: String::new(),
        }
    }
}

impl WorkflowConfig {
    /// Fill in empty identity fields and make the project directory absolute.
    ///
    /// Applied on every load and before every save.
    pub fn normalize(&mut self) {
        if self.branch.trim().is_empty() {
            DEFAULT_BRANCH.clone_into(&mut self.branch);
        }
        if self.default_branch.trim().is_empty() {
            self.default_branch.clone_from(&self.branch);
        }
        if self.remote_name.trim().is_empty() {
            DEFAULT_REMOTE.clone_into(&mut self.remote_name);
        }
        if !self.project_directory.is_empty() {
            self.project_directory = resolve_directory(Path::new(&self.project_directory))
                .display()
                .to_string();
        }
    }

    /// Directory every git call is bound to.
    ///
    /// Falls back to `invocation_dir` when no project directory is set.
    #[must_use]
    pub fn project_dir(&self, invocation_dir: &Path) -> PathBuf {
        if self.project_directory.is_empty() {
            invocation_dir.to_path_buf()
        } else {
            PathBuf::from(&self.project_directory)
        }
    }

    /// Whether both halves of the hosted repository identity are known.
    #[must_use]
    pub fn has_repository_identity(&self) -> bool {
        !self.owner.is_empty() && !self.repo_name.is_empty()
    }
}

/// Absolute form of `path`, with symlinks resolved when it exists.
#[must_use]
pub fn resolve_directory(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    std::fs::canonicalize(&absolute).unwrap_or(absolute)
}
