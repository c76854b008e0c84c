//! Command handlers, one module per top-level command.

pub mod fabric;
pub mod server;
pub mod switch;
pub mod template;

use dcnm_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Run a controller command against `session`.
pub async fn dispatch(
    cmd: Command,
    session: &mut Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Switch(args) => switch::handle(session, args, global).await,
        Command::Fabric(args) => fabric::handle(session, args, global).await,
        Command::Template(args) => template::handle(session, args, global).await,
        Command::Server => server::handle(session, global).await,
        // Completions are handled before connecting
        Command::Completions(_) => unreachable!(),
    }
}
