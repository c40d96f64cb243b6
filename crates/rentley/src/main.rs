mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rentley_api::ApiClient;
use rentley_core::SessionStore;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

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
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a server connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global).await,

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "rentley", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the platform
        cmd => {
            let settings = config::resolve_client_settings(&cli.global)?;
            let client = ApiClient::new(settings.base_url, &settings.transport)
                .map_err(CliError::from)?;
            let store = SessionStore::new();

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &client, &store, &cli.global).await;

            // Global 401 recovery: a rejected credential is cleared no
            // matter which call tripped over it.
            if matches!(result, Err(CliError::SessionExpired)) {
                let _ = rentley_config::clear_token();
            }
            result
        }
    }
}
