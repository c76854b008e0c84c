mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dcnm_config::Overrides;
use dcnm_core::{CoreError, Session};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "dcnmctl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a controller session
        cmd => {
            let mut session = connect(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &mut session, &cli.global).await;
            session.logout().await;
            result
        }
    }
}

/// Build a session from the connection file (or environment) plus CLI
/// overrides. No network I/O happens here.
fn connect(global: &GlobalOpts) -> Result<Session, CliError> {
    let overrides = Overrides {
        host: global.host.clone(),
        user: global.user.clone(),
        pass: global.pass.clone(),
        version: global.dcnm_version.clone(),
    };
    let conn = dcnm_config::load_connection_with(&global.conn, &overrides)?;
    tracing::debug!(host = %conn.host, source = ?conn.source, "connection parameters loaded");

    let config = conn.session_config(global.secure, Duration::from_secs(global.timeout));
    Session::new(config).map_err(|e| CliError::from(CoreError::from(e)))
}
