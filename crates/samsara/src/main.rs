mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use samsara_core::Samsara;

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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // No store connection needed
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "samsara", &mut std::io::stdout());
            Ok(())
        }

        // These authenticate on their own
        Command::Login { user, no_save } => commands::auth::login(user, no_save, &cli.global).await,
        Command::ResetPassword { email } => {
            commands::auth::reset_password(&email, &cli.global).await
        }

        cmd => {
            let store_config = config::build_store_config(&cli.global)?;
            let samsara = Samsara::new(store_config)?;
            if let Some(session) = samsara.connect().await? {
                tracing::debug!(
                    username = %session.username,
                    tipo_acesso = %session.tipo_acesso,
                    "session established"
                );
            }

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &samsara, &cli.global).await
        }
    }
}
