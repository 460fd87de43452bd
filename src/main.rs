// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Logging --> AppContext --> run_command
//!                                              menu | status | push | ...
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use genius_rs::cli::global::GlobalOptions;
use genius_rs::cli::{self, Command};
use genius_rs::cmd::{AppContext, run_command};
use genius_rs::config::loader::SettingsLoader;
use genius_rs::config::{LoggingSettings, Settings};
use genius_rs::git::ShellGateway;
use genius_rs::logging::{LogConfig, init_logging};
use genius_rs::remote::GitHubClient;
use genius_rs::state::StateStore;
use genius_rs::ui::TerminalConsole;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let invocation_dir = match resolve_invocation_dir(&cli.global) {
        Ok(dir) => dir,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
    };
    let state_root = cli
        .global
        .state_root
        .clone()
        .unwrap_or_else(|| invocation_dir.clone());
    let store = StateStore::new(&state_root, &invocation_dir);

    let loader = build_settings_loader(&cli.global, &store);
    let settings_sources = loader.format_loaded_files();
    let mut settings = match loader.build() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    cli.global.apply_overrides(&mut settings);

    let log_config = build_log_config(&settings.logging);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = build_context(&cli.global, store, settings, settings_sources);
    let command = cli.command.unwrap_or(Command::Menu);
    match run_command(&ctx, &command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ctx.report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn resolve_invocation_dir(global: &GlobalOptions) -> Result<PathBuf, String> {
    match &global.dir {
        Some(dir) if dir.is_dir() => Ok(dir.clone()),
        Some(dir) => Err(format!("not a directory: {}", dir.display())),
        None => std::env::current_dir()
            .map_err(|e| format!("cannot determine the current directory: {e}")),
    }
}

fn build_settings_loader(global: &GlobalOptions, store: &StateStore) -> SettingsLoader {
    let mut loader =
        SettingsLoader::new().add_toml_file_optional(store.control().settings_file());
    if let Some(path) = &global.config {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix("GENIUS")
}

fn build_log_config(logging: &LoggingSettings) -> LogConfig {
    let file_level = logging.file_level.unwrap_or(logging.level);

    LogConfig::builder()
        .with_console_level(logging.level)
        .with_file_level(file_level)
        .maybe_with_log_file(logging.file.as_ref().map(|p| p.display().to_string()))
        .build()
}

fn build_context(
    global: &GlobalOptions,
    store: StateStore,
    settings: Settings,
    settings_sources: Vec<String>,
) -> AppContext<ShellGateway, TerminalConsole, GitHubClient> {
    AppContext {
        git: ShellGateway::new(),
        console: TerminalConsole::new().assume_yes(global.yes),
        host: GitHubClient::from_settings(&settings.github),
        store,
        settings,
        settings_sources,
    }
}
