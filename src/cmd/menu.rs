// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive menu.
//!
//! ```text
//! ┌ context panel (project, path, branch, remote, repository) ┐
//! 1 Daily Workflow     push | pull | smart pull | fetch | status
//! 2 Branch & Remote    switch branch | switch remote
//! 3 Stash & Undo       save | list | pop | undo last commit
//! 4 Tools              setup | create/link | change dir | doctor
//! 5 Help  (h, help, ?)
//! 6 Exit
//! ```
//!
//! A failed operation is reported and the menu keeps running. End of input
//! leaves the menu.

use std::path::Path;
use tracing::debug;

use super::AppContext;
use super::workflow::execute;
use crate::cli::Command;
use crate::cli::workflow::{
    BranchArgs, ChdirArgs, LinkArgs, PushArgs, RemoteArgs, StashArgs, StashSubcommand,
};
use crate::error::GeniusResult;
use crate::git::VcsGateway;
use crate::remote::RemoteHost;
use crate::ui::Console;

/// Whether the menu keeps going after a submenu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// A numbered list of operations; "Back" is appended after the last one.
struct Submenu {
    title: &'static str,
    items: &'static [&'static str],
}

const DAILY: Submenu = Submenu {
    title: "Daily Workflow",
    items: &[
        "Push changes",
        "Pull",
        "Smart pull (auto-stash)",
        "Fetch",
        "Status",
    ],
};

const BRANCH: Submenu = Submenu {
    title: "Branch & Remote",
    items: &["Switch branch", "Switch remote"],
};

const STASH: Submenu = Submenu {
    title: "Stash & Undo",
    items: &["Stash save", "Stash list", "Stash pop", "Undo last commit"],
};

const TOOLS: Submenu = Submenu {
    title: "Tools",
    items: &[
        "Guided setup",
        "Create / Link GitHub repository",
        "Change project directory",
        "Doctor",
    ],
};

const MAIN: [&str; 6] = [
    "Daily Workflow",
    "Branch & Remote",
    "Stash & Undo",
    "Tools",
    "Help",
    "Exit",
];

const HELP: [&str; 8] = [
    "Daily Workflow   commit and push, pull (optionally stashing local edits), fetch, status",
    "Branch & Remote  check out a branch or point a remote at a new URL",
    "Stash & Undo     shelve edits, bring them back, or undo the last commit (changes kept)",
    "Tools            first-time setup, GitHub repository linking, health checks",
    "",
    "The configured branch and the checked-out branch are compared before most",
    "operations; a mismatch offers a rename or adopts the checked-out branch.",
    "Failures are recorded in .git/.genius/error.log.",
];

/// Run the menu until the operator exits or input ends.
///
/// # Errors
///
/// Never fails on operation errors; those are reported in place.
pub async fn run_menu<G, C, H>(ctx: &AppContext<G, C, H>) -> GeniusResult<()>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    loop {
        render_context(ctx);
        ctx.console.header("Git Genius");
        for (i, item) in MAIN.iter().enumerate() {
            ctx.console.output(&format!("{}. {item}", i + 1));
        }

        let Some(choice) = ctx.console.choose("Select option") else {
            return Ok(());
        };
        let flow = match choice.to_lowercase().as_str() {
            "1" => run_submenu(ctx, &DAILY, daily_command).await,
            "2" => run_submenu(ctx, &BRANCH, branch_command).await,
            "3" => run_submenu(ctx, &STASH, stash_command).await,
            "4" => run_submenu(ctx, &TOOLS, tools_command).await,
            "5" | "h" | "help" | "?" => {
                show_help(&ctx.console);
                Flow::Continue
            }
            "6" | "q" | "exit" => {
                ctx.console.info("Goodbye");
                return Ok(());
            }
            _ => {
                ctx.console.warn("Invalid option");
                Flow::Continue
            }
        };
        if flow == Flow::Exit {
            return Ok(());
        }
    }
}

/// Project, path, branch, remote and (when known) the repository URL.
fn render_context<G, C, H>(ctx: &AppContext<G, C, H>)
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    let config = ctx.store.load();
    let dir = config.project_dir(ctx.store.invocation_dir());
    let project = dir
        .file_name()
        .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned());

    ctx.console.header("Context");
    ctx.console.output(&format!("Project : {project}"));
    ctx.console
        .output(&format!("Path    : {}", dir.display()));
    ctx.console
        .output(&format!("Branch  : {}", observed_branch(ctx, &dir, &config.branch)));
    ctx.console
        .output(&format!("Remote  : {}", config.remote_name));
    if config.has_repository_identity() {
        ctx.console.output(&format!(
            "Repo    : {}/{}/{}",
            ctx.host.web_url().trim_end_matches('/'),
            config.owner,
            config.repo_name
        ));
    }
}

/// Configured branch, annotated when git has something else checked out.
fn observed_branch<G, C, H>(ctx: &AppContext<G, C, H>, dir: &Path, configured: &str) -> String
where
    G: VcsGateway,
{
    let current = ctx.git.current_branch(dir);
    if current.is_empty() || current == configured {
        configured.to_string()
    } else {
        format!("{configured} (git: {current})")
    }
}

fn show_help<C: Console>(console: &C) {
    console.header("Help");
    for line in HELP {
        console.output(line);
    }
}

/// Show `menu`, run the chosen operation once, then go back to the main menu.
async fn run_submenu<G, C, H>(
    ctx: &AppContext<G, C, H>,
    menu: &Submenu,
    to_command: fn(usize, &C) -> Command,
) -> Flow
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    let back = menu.items.len() + 1;
    loop {
        ctx.console.header(menu.title);
        for (i, item) in menu.items.iter().enumerate() {
            ctx.console.output(&format!("{}. {item}", i + 1));
        }
        ctx.console.output(&format!("{back}. Back"));

        let Some(choice) = ctx.console.choose("Select option") else {
            return Flow::Exit;
        };
        match choice.parse::<usize>() {
            Ok(n) if n == back => return Flow::Continue,
            Ok(n) if (1..back).contains(&n) => {
                let command = to_command(n, &ctx.console);
                debug!(menu = menu.title, item = menu.items[n - 1], "menu selection");
                if let Err(e) = execute(ctx, &command).await {
                    ctx.report_failure(&e);
                }
                return Flow::Continue;
            }
            _ => ctx.console.warn("Invalid option"),
        }
    }
}

fn daily_command<C: Console>(choice: usize, _console: &C) -> Command {
    match choice {
        1 => Command::Push(PushArgs::default()),
        2 => Command::Pull,
        3 => Command::SmartPull,
        4 => Command::Fetch,
        _ => Command::Status,
    }
}

fn branch_command<C: Console>(choice: usize, _console: &C) -> Command {
    match choice {
        1 => Command::Branch(BranchArgs::default()),
        _ => Command::Remote(RemoteArgs::default()),
    }
}

fn stash_command<C: Console>(choice: usize, console: &C) -> Command {
    let subcommand = match choice {
        1 => {
            let message = console.input("Stash message (optional)");
            StashSubcommand::Save {
                message: (!message.is_empty()).then_some(message),
            }
        }
        2 => StashSubcommand::List,
        3 => StashSubcommand::Pop,
        _ => return Command::Undo,
    };
    Command::Stash(StashArgs { subcommand })
}

fn tools_command<C: Console>(choice: usize, _console: &C) -> Command {
    match choice {
        1 => Command::Setup,
        2 => Command::Link(LinkArgs::default()),
        3 => Command::Chdir(ChdirArgs::default()),
        _ => Command::Doctor,
    }
}
