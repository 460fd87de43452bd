// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --dir DIR          ← Run as if started in DIR
//! --state-root DIR   ← Where .git/.genius/ lives (default: --dir)
//! --config FILE      ← Additional settings file
//! --offline          ← network.offline = true
//! --log-level N      ← Console verbosity (0-6)
//! --file-log-level   ← File verbosity (overrides --log-level)
//! --log-file FILE    ← logging.file
//! --yes              ← Answer every confirmation with yes
//!
//! Precedence: CLI flags > GENIUS_* env > --config > genius.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::Settings;
use crate::logging::LogLevel;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Runs as if genius was started in this directory.
    #[arg(short = 'C', long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Directory whose `.git/.genius/` holds the workflow state.
    #[arg(long = "state-root", value_name = "DIR", global = true)]
    pub state_root: Option<PathBuf>,

    /// Additional TOML settings file.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Never call the GitHub API.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Answers every confirmation with yes (for scripting).
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,
}

impl GlobalOptions {
    /// Apply command-line overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if self.offline {
            settings.network.offline = true;
        }

        if let Some(level) = self.log_level.and_then(LogLevel::from_u8) {
            settings.logging.level = level;
        }

        // file level falls back to the console level if not specified
        if let Some(level) = self
            .file_log_level
            .or(self.log_level)
            .and_then(LogLevel::from_u8)
        {
            settings.logging.file_level = Some(level);
        }

        if let Some(path) = &self.log_file {
            settings.logging.file = Some(path.clone());
        }
    }
}
