use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::AppConfig;
use crate::interfaces::cli::{dispatch, AppState, Cli};

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!(error = %err, "Failed to load configuration");
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_filter);
    info!(model = %config.gemini.model, "Configuration loaded");

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            error!(error = %err, "Failed to initialise application state");
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    match dispatch(&state, &cli.command, &mut stdout).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, precondition = err.is_precondition(), "Command failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
