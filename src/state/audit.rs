// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Append-only failure log.
//!
//! ```text
//! [2026-10-17 14:03:22] git push -u origin main: git command failed: ...
//! ```

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use tracing::trace;

use super::{ControlDir, restrict_permissions};

/// Best-effort record of operation failures.
///
/// Writing never fails from the caller's point of view.
#[derive(Debug, Clone)]
pub struct AuditLog {
    control: ControlDir,
}

impl AuditLog {
    #[must_use]
    pub const fn new(control: ControlDir) -> Self {
        Self { control }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.control.error_log()
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    /// Append one timestamped line. Any I/O problem is swallowed.
    pub fn record(&self, context: &str, error: &dyn Display) {
        if let Err(e) = self.try_record(context, error) {
            trace!(error = %e, "audit log write failed");
        }
    }

    fn try_record(&self, context: &str, error: &dyn Display) -> std::io::Result<()> {
        std::fs::create_dir_all(self.control.path())?;
        let path = self.path();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let _ = restrict_permissions(&path, 0o600);

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        // One write per line keeps concurrent appends from interleaving mid-line.
        let line = format!("[{timestamp}] {context}: {error}\n");
        file.write_all(line.as_bytes())
    }
}
