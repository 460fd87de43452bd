// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workflow command arguments.
//!
//! Omitted values are prompted for, as in the menu.

use clap::{Args, Subcommand};

/// Arguments for the `push` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PushArgs {
    /// Commit message. The first commit defaults to the configured message.
    #[arg(short = 'm', long)]
    pub message: Option<String>,
}

/// Arguments for the `branch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BranchArgs {
    /// Branch to check out (created if missing).
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the `remote` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RemoteArgs {
    /// Remote name.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Remote URL.
    #[arg(value_name = "URL")]
    pub url: Option<String>,
}

/// Arguments for the `stash` command.
#[derive(Debug, Clone, Args)]
pub struct StashArgs {
    /// Stash subcommand.
    #[command(subcommand)]
    pub subcommand: StashSubcommand,
}

/// Stash subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum StashSubcommand {
    /// Stashes local changes.
    Save {
        /// Stash message.
        #[arg(short = 'm', long)]
        message: Option<String>,
    },

    /// Lists stashes.
    List,

    /// Applies and drops the most recent stash.
    Pop,
}

/// Arguments for the `link` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LinkArgs {
    /// GitHub user or organisation owning the repository.
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name.
    #[arg(long)]
    pub repo: Option<String>,
}

/// Arguments for the `chdir` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ChdirArgs {
    /// New project directory, absolute or relative to the current one.
    #[arg(value_name = "PATH")]
    pub path: Option<String>,
}
