// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persisted workflow state.
//!
//! ```text
//! <state root>/.git/.genius/        (0700)
//!   config.json   WorkflowConfig     StateStore
//!   token         access token       CredentialStore (0600)
//!   error.log     failure audit      AuditLog (append, best-effort)
//!   genius.toml   app settings       crate::config (optional)
//! ```
//!
//! The state root is the directory the tool was started from unless the
//! operator overrides it. The project directory recorded in the config may
//! point somewhere else entirely.

pub mod audit;
pub mod credentials;
pub mod store;
pub mod workflow;


use std::path::{Path, PathBuf};

use crate::error::{GeniusResult, StateError};

pub use audit::AuditLog;
pub use credentials::CredentialStore;
pub use store::StateStore;
pub use workflow::WorkflowConfig;

/// Control directory relative to the state root.
pub const CONTROL_DIR: &str = ".git/.genius";

/// Workflow configuration file name.
pub const CONFIG_FILE: &str = "config.json";

/// Credential file name.
pub const TOKEN_FILE: &str = "token";

/// Audit log file name.
pub const ERROR_LOG_FILE: &str = "error.log";

/// Resolves the files under one state root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlDir {
    dir: PathBuf,
}

impl ControlDir {
    /// Control directory for the given state root.
    #[must_use]
    pub fn new(state_root: &Path) -> Self {
        Self {
            dir: state_root.join(CONTROL_DIR),
        }
    }

    /// The control directory itself.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn token_file(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    #[must_use]
    pub fn error_log(&self) -> PathBuf {
        self.dir.join(ERROR_LOG_FILE)
    }

    /// Optional settings file living next to the state.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.dir.join("genius.toml")
    }

    /// Create the control directory (owner-only on unix).
    ///
    /// # Errors
    ///
    /// Returns a `StateError::Io` if the directory cannot be created.
    pub fn ensure(&self) -> GeniusResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| io_error(&self.dir, source))?;
        restrict_permissions(&self.dir, 0o700)
    }
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> StateError {
    StateError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(unix)]
pub(crate) fn restrict_permissions(path: &Path, mode: u32) -> GeniusResult<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|source| io_error(path, source).into())
}

#[cfg(not(unix))]
pub(crate) fn restrict_permissions(_path: &Path, _mode: u32) -> GeniusResult<()> {
    Ok(())
}

/// Write `contents` to `path` atomically with owner-only permissions.
///
/// The data lands in a temp file in the same directory and is renamed over
/// the destination, so a crash never leaves a half-written record.
pub(crate) fn write_private(path: &Path, contents: &[u8]) -> GeniusResult<()> {
    use std::io::Write;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| io_error(dir, source))?;
    tmp.write_all(contents)
        .map_err(|source| io_error(tmp.path(), source))?;
    restrict_permissions(tmp.path(), 0o600)?;
    tmp.persist(path)
        .map_err(|e| io_error(path, e.error))?;
    Ok(())
}
