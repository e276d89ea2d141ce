//! # DocVault CLI
//!
//! Command-line client for the DocVault document service.

use clap::Parser;

mod commands;
mod config;
mod navigator;
mod state;
mod telemetry;

use commands::Cli;
use config::ClientConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?.with_overrides(cli.api_url, cli.session_file);

    let state = AppState::new(&config).await?;
    commands::run(cli.command, &state).await
}
