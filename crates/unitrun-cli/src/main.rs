//! CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use unitrun_cli::{Cli, CliError, Commands, handlers, logging};

async fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run { options } => {
            handlers::run::execute(&options.to_settings()).await?;
        }
        Commands::Resolve { options, json } => {
            handlers::resolve::execute(&options.to_settings(), json)?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before parsing so it can supply option defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    logging::init(cli.verbose, cli.quiet)?;

    match dispatch(cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("{e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
