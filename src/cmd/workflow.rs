// genius-rs: guided git workflow assistant
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command dispatch onto workflow operations.

use super::AppContext;
use super::config::run_options_command;
use super::menu::run_menu;
use crate::cli::Command;
use crate::cli::workflow::StashSubcommand;
use crate::doctor::Doctor;
use crate::error::{GeniusError, GeniusResult};
use crate::git::VcsGateway;
use crate::remote::RemoteHost;
use crate::ui::Console;

/// Run one command to completion.
///
/// # Errors
///
/// Returns the failing operation's error. Declined prompts are not errors.
pub async fn run_command<G, C, H>(ctx: &AppContext<G, C, H>, command: &Command) -> GeniusResult<()>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    match command {
        Command::Menu => run_menu(ctx).await,
        other => execute(ctx, other).await,
    }
}

/// Run a single operation. Shared by direct commands and the menu.
///
/// # Errors
///
/// Returns the failing operation's error.
pub(super) async fn execute<G, C, H>(ctx: &AppContext<G, C, H>, command: &Command) -> GeniusResult<()>
where
    G: VcsGateway,
    C: Console,
    H: RemoteHost,
{
    let mut workflow = ctx.workflow();
    match command {
        Command::Status => workflow.status().map(drop),
        Command::Push(args) => workflow.push(args.message.as_deref()).map(drop),
        Command::Pull => workflow.pull(),
        Command::SmartPull => workflow.smart_pull().map(drop),
        Command::Fetch => workflow.fetch(),
        Command::Branch(args) => workflow.switch_branch(args.name.as_deref()).map(drop),
        Command::Remote(args) => workflow
            .switch_remote(args.name.as_deref(), args.url.as_deref())
            .map(drop),
        Command::Stash(args) => match &args.subcommand {
            StashSubcommand::Save { message } => workflow.stash_save(message.as_deref()),
            StashSubcommand::List => workflow.stash_list().map(drop),
            StashSubcommand::Pop => workflow.stash_pop(),
        },
        Command::Undo => workflow.undo_last_commit().map(drop),
        Command::Setup => workflow.setup().await.map(drop),
        Command::Link(args) => workflow
            .create_or_link(args.owner.as_deref(), args.repo.as_deref())
            .await
            .map(drop),
        Command::Chdir(args) => workflow
            .change_project_directory(args.path.as_deref())
            .map(drop),
        Command::Doctor => {
            let session = ctx.session();
            let report = Doctor::new(&ctx.git, &ctx.host, &ctx.store, &session)
                .run()
                .await;
            report.render(&ctx.console);
            if report.is_healthy() {
                Ok(())
            } else {
                Err(GeniusError::Other("health check found failures".into()))
            }
        }
        Command::Options => {
            run_options_command(&ctx.console, &ctx.settings, &ctx.settings_sources);
            Ok(())
        }
        Command::Version => {
            ctx.console.output(env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        // already inside the menu
        Command::Menu => Ok(()),
    }
}
