// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load/save of [`WorkflowConfig`].
//!
//! ```text
//! load():  read config.json --(missing | bad JSON)--> defaults
//!                  |
//!                  v
//!             normalize()
//!
//! save():  normalize() --> pretty JSON --> temp file --> rename (0600)
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::workflow::WorkflowConfig;
use super::{ControlDir, write_private};
use crate::error::{GeniusResult, StateError};

/// Reads and writes the workflow record under one state root.
///
/// Nothing is cached: each [`load`](Self::load) goes back to disk.
#[derive(Debug, Clone)]
pub struct StateStore {
    control: ControlDir,
    invocation_dir: PathBuf,
}

impl StateStore {
    /// Store rooted at `state_root`; `invocation_dir` backs an unset project
    /// directory.
    #[must_use]
    pub fn new(state_root: &Path, invocation_dir: &Path) -> Self {
        Self {
            control: ControlDir::new(state_root),
            invocation_dir: invocation_dir.to_path_buf(),
        }
    }

    /// Store where the state root and the invocation directory coincide.
    #[must_use]
    pub fn at(root: &Path) -> Self {
        Self::new(root, root)
    }

    #[must_use]
    pub const fn control(&self) -> &ControlDir {
        &self.control
    }

    #[must_use]
    pub fn invocation_dir(&self) -> &Path {
        &self.invocation_dir
    }

    /// Load the record. Absent or unreadable state yields defaults.
    #[must_use]
    pub fn load(&self) -> WorkflowConfig {
        let path = self.control.config_file();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "unparsable workflow state, using defaults");
                WorkflowConfig::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no workflow state, using defaults");
                WorkflowConfig::default()
            }
        };
        config.normalize();
        config
    }

    /// Normalize and persist the record.
    ///
    /// # Errors
    ///
    /// Returns a `StateError` if the control directory or the file cannot be
    /// written.
    pub fn save(&self, config: &WorkflowConfig) -> GeniusResult<()> {
        let mut config = config.clone();
        config.normalize();

        self.control.ensure()?;
        let json = serde_json::to_vec_pretty(&config).map_err(StateError::Serialize)?;
        let path = self.control.config_file();
        write_private(&path, &json)?;
        debug!(path = %path.display(), branch = %config.branch, "workflow state saved");
        Ok(())
    }
}
