// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for genius-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! genius [global options] [command]
//! menu                      (default)
//! status | pull | smart-pull | fetch
//! push [-m MSG]
//! branch [NAME]
//! remote [NAME] [URL]
//! stash {save [-m MSG]|list|pop}
//! undo
//! setup
//! link [--owner O] [--repo R]
//! chdir [PATH]
//! doctor
//! options | version
//! ```

pub mod global;
pub mod workflow;


use clap::{Parser, Subcommand};

use crate::cli::global::GlobalOptions;
use crate::cli::workflow::{BranchArgs, ChdirArgs, LinkArgs, PushArgs, RemoteArgs, StashArgs};

/// Guided git and GitHub workflow assistant.
#[derive(Debug, Parser)]
#[command(
    name = "genius",
    author,
    version,
    about = "Guided git and GitHub workflow assistant",
    long_about = "genius-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Commits, pushes, pulls and links a project to GitHub while\n\
                  keeping the configured branch and the checked-out branch in\n\
                  agreement. Run `genius` without a command for the menu, or\n\
                  `genius <command> --help` for a single operation.",
    after_help = "STATE:\n\n\
                  Workflow state lives in `.git/.genius/` under the directory\n\
                  genius was started from (see --dir and --state-root):\n\
                  config.json (branch, remote, repository), token (0600),\n\
                  error.log (failed operations) and an optional genius.toml\n\
                  with application settings. GENIUS_* environment variables\n\
                  override the settings file; command-line flags override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Opens the interactive menu (default).
    Menu,

    /// Shows `git status` of the project directory.
    Status,

    /// Commits pending changes and pushes them.
    Push(PushArgs),

    /// Pulls the working branch.
    Pull,

    /// Stashes local changes, pulls, then restores them.
    #[command(name = "smart-pull")]
    SmartPull,

    /// Fetches all remotes.
    Fetch,

    /// Checks out (or creates) a branch and makes it the configured one.
    Branch(BranchArgs),

    /// Points a remote at a URL and makes it the configured one.
    Remote(RemoteArgs),

    /// Saves, lists or pops stashes.
    Stash(StashArgs),

    /// Undoes the last commit, keeping its changes staged.
    Undo,

    /// Guided first-time setup.
    Setup,

    /// Creates the GitHub repository if needed and links it as the remote.
    Link(LinkArgs),

    /// Changes the project directory.
    Chdir(ChdirArgs),

    /// Checks git, the repository, the token and GitHub access.
    Doctor,

    /// Lists the effective settings and the files they came from.
    Options,

    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
