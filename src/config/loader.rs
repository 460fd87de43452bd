// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! SettingsLoader::new()
//!   .add_toml_file_optional(<control dir>/genius.toml)
//!   .add_toml_file(--config)
//!   .with_env_prefix("GENIUS")
//!        |
//!        v
//!    build() --> Settings (validated)
//! ```
//!
//! Command-line flags are applied to the built [`Settings`] afterwards.

use std::path::PathBuf;

use super::Settings;
use crate::error::{ConfigError, GeniusError, GeniusResult, Result};
use crate::logging::LogLevel;

/// Builder for loading settings from multiple sources.
pub struct SettingsLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML settings file that must exist.
    #[must_use]
    pub fn add_toml_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables, plus the `PREFIX_SECTION_KEY`
    /// shorthand for known keys such as `GENIUS_GITHUB_API_URL`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Builds the settings from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required settings files are missing.
    /// - Settings files have invalid TOML syntax.
    /// - Environment variables cannot be parsed or hold invalid values.
    /// - The merged settings fail validation.
    pub fn build(self) -> Result<Settings> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        apply_section_env(&mut settings, self.env_prefix.as_deref())?;
        settings.validate()?;
        Ok(settings)
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `PREFIX_SECTION_KEY` variables whose key contains underscores.
///
/// The `config` crate splits every separator occurrence, which cannot express
/// `github.api_url` with a single `_`. The handful of known keys are mapped
/// here instead.
fn apply_section_env(settings: &mut Settings, prefix: Option<&str>) -> GeniusResult<()> {
    let Some(prefix) = prefix else {
        return Ok(());
    };
    let var = |name: &str| std::env::var(format!("{prefix}_{name}")).ok();
    let parsed = |section: &str, key: &str, name: &str| -> GeniusResult<Option<u64>> {
        var(name)
            .map(|v| {
                v.trim().parse::<u64>().map_err(|_| {
                    invalid(section, key, &format!("{prefix}_{name}={v} is not a number"))
                })
            })
            .transpose()
    };

    if let Some(v) = var("GITHUB_API_URL") {
        settings.github.api_url = v;
    }
    if let Some(v) = var("GITHUB_WEB_URL") {
        settings.github.web_url = v;
    }
    if let Some(v) = parsed("github", "timeout_secs", "GITHUB_TIMEOUT_SECS")? {
        settings.github.timeout_secs = v;
    }
    let validate_timeout = parsed(
        "github",
        "validate_timeout_secs",
        "GITHUB_VALIDATE_TIMEOUT_SECS",
    )?;
    if let Some(v) = validate_timeout {
        settings.github.validate_timeout_secs = v;
    }
    if let Some(v) = var("NETWORK_OFFLINE") {
        let message = format!("{prefix}_NETWORK_OFFLINE={v} is not true or false");
        settings.network.offline = v
            .trim()
            .parse()
            .map_err(|_| invalid("network", "offline", &message))?;
    }
    if let Some(v) = var("WORKFLOW_AUTO_STASH_LABEL") {
        settings.workflow.auto_stash_label = v;
    }
    if let Some(v) = var("WORKFLOW_DEFAULT_COMMIT_MESSAGE") {
        settings.workflow.default_commit_message = v;
    }
    let level = |key: &str, name: &str| -> GeniusResult<Option<LogLevel>> {
        var(name)
            .map(|v| {
                v.trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(LogLevel::from_u8)
                    .ok_or_else(|| {
                        let message = format!("{prefix}_{name}={v} is not a level from 0 to 6");
                        invalid("logging", key, &message)
                    })
            })
            .transpose()
    };
    if let Some(v) = level("level", "LOGGING_LEVEL")? {
        settings.logging.level = v;
    }
    if let Some(v) = level("file_level", "LOGGING_FILE_LEVEL")? {
        settings.logging.file_level = Some(v);
    }
    if let Some(v) = var("LOGGING_FILE").filter(|v| !v.trim().is_empty()) {
        settings.logging.file = Some(PathBuf::from(v));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, message: &str) -> GeniusError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
    .into()
}
