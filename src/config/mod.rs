// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Application settings.
//!
//! These tune how the tool talks to the outside world. They are separate
//! from the persisted [`WorkflowConfig`](crate::state::WorkflowConfig), which
//! records what the operator wants done to the repository.
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. genius.toml in the control directory (.git/.genius/)
//! 3. --config FILE
//! 4. GENIUS_* env vars
//! 5. CLI overrides (--offline, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GENIUS_NETWORK_OFFLINE=true        → network.offline = true
//! GENIUS_GITHUB_API_URL=http://...   → github.api_url = "http://..."
//! GENIUS_LOGGING_LEVEL=4             → logging.level = 4
//! GENIUS_LOGGING_FILE_LEVEL=5        → logging.file_level = 5
//! GENIUS_LOGGING_FILE=/tmp/g.log     → logging.file = "/tmp/g.log"
//! GENIUS_GITHUB__TIMEOUT_SECS=30     → github.timeout_secs = 30 (generic form)
//! ```
//!
//! A shorthand variable whose value does not parse is an error.

pub mod loader;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{ConfigError, GeniusResult};
use crate::logging::LogLevel;

pub use loader::SettingsLoader;

/// Complete application settings.
///
/// Sections reject unknown keys. The top level tolerates them so unrelated
/// `GENIUS_*` variables in the environment do not break loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub github: GithubSettings,
    pub network: NetworkSettings,
    pub workflow: WorkflowSettings,
    pub logging: LoggingSettings,
}

/// Hosting API endpoints and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubSettings {
    /// REST API base URL.
    pub api_url: String,
    /// Web base URL used to build remote URLs.
    pub web_url: String,
    /// Timeout for repository calls, in seconds.
    pub timeout_secs: u64,
    /// Timeout for token validation, in seconds.
    pub validate_timeout_secs: u64,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            timeout_secs: 10,
            validate_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSettings {
    /// Skip every hosting API call.
    pub offline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowSettings {
    /// Message for the first commit when none is given.
    pub default_commit_message: String,
    /// Prefix of the smart-pull stash label.
    pub auto_stash_label: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            default_commit_message: "Initial commit".to_string(),
            auto_stash_label: "genius-auto-stash".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Console level (0-6).
    pub level: LogLevel,
    /// File level (0-6).
    pub file_level: Option<LogLevel>,
    /// Diagnostic log file. Unset means console only.
    pub file: Option<PathBuf>,
}

impl Settings {
    /// Reject values that would make the tool misbehave.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> GeniusResult<()> {
        let invalid = |section: &str, key: &str, message: &str| -> GeniusResult<()> {
            Err(ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                message: message.to_string(),
            }
            .into())
        };

        if self.github.timeout_secs == 0 {
            return invalid("github", "timeout_secs", "must be greater than zero");
        }
        if self.github.validate_timeout_secs == 0 {
            return invalid("github", "validate_timeout_secs", "must be greater than zero");
        }
        for (key, url) in [
            ("api_url", &self.github.api_url),
            ("web_url", &self.github.web_url),
        ] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return invalid("github", key, "must be an http(s) URL");
            }
        }
        if self.workflow.auto_stash_label.trim().is_empty() {
            return invalid("workflow", "auto_stash_label", "cannot be empty");
        }
        if self.workflow.default_commit_message.trim().is_empty() {
            return invalid("workflow", "default_commit_message", "cannot be empty");
        }
        Ok(())
    }

    /// Format settings for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("github.api_url", self.github.api_url.clone());
        options.insert("github.web_url", self.github.web_url.clone());
        options.insert("github.timeout_secs", self.github.timeout_secs.to_string());
        options.insert(
            "github.validate_timeout_secs",
            self.github.validate_timeout_secs.to_string(),
        );
        options.insert("network.offline", self.network.offline.to_string());
        options.insert(
            "workflow.default_commit_message",
            self.workflow.default_commit_message.clone(),
        );
        options.insert(
            "workflow.auto_stash_label",
            self.workflow.auto_stash_label.clone(),
        );
        options.insert("logging.level", self.logging.level.as_u8().to_string());
        options.insert(
            "logging.file_level",
            self.logging
                .file_level
                .map_or_else(|| "(console level)".to_string(), |l| l.as_u8().to_string()),
        );
        options.insert(
            "logging.file",
            self.logging
                .file
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
