// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Access token storage.

use std::path::PathBuf;

use super::{ControlDir, write_private};
use crate::error::{GeniusResult, StateError};

/// Single opaque secret stored owner-only in the control directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    control: ControlDir,
}

impl CredentialStore {
    #[must_use]
    pub const fn new(control: ControlDir) -> Self {
        Self { control }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.control.token_file()
    }

    /// The stored token, `None` when missing or blank.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        std::fs::read_to_string(self.path())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Store `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StateError::EmptyCredential` for a blank token, or an I/O
    /// error if the file cannot be written.
    pub fn save(&self, token: &str) -> GeniusResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StateError::EmptyCredential.into());
        }
        self.control.ensure()?;
        write_private(&self.path(), token.as_bytes())
    }

    /// Remove the token. Missing files are fine.
    pub fn delete(&self) {
        let _ = std::fs::remove_file(self.path());
    }
}
