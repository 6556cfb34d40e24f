//! Command dispatch: bridges CLI args -> booking pipeline -> output formatting.

pub mod account;
pub mod airports;
pub mod book;
pub mod config_cmd;
pub mod details;
pub mod geo;
pub mod interest;
pub mod newsletter;
pub mod submit;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;

/// Dispatch a context-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Airports(args) => airports::handle(ctx, args, global),
        Command::Book(args) => book::handle(ctx, args, global),
        Command::Details => details::handle(ctx, global),
        Command::Submit(args) => submit::handle(ctx, args, global).await,
        Command::Interest(args) => interest::handle(ctx, args, global).await,
        Command::Cancel => details::cancel(ctx, global),
        Command::Newsletter(args) => newsletter::handle(ctx, args, global).await,
        Command::Account(args) => account::handle(ctx, args, global).await,
        Command::Geo => geo::handle(ctx, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
