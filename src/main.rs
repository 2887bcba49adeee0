//! Flopar terminal client
//!
//! Warehouse, driver and administrator staff verify the day's products against
//! the inventory backend and confirm truck quadratures.

mod api;
mod auth;
mod cli;
mod config;
mod errors;
mod filter;
mod models;
mod quadrature;
mod scan;
mod screens;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use config::Config;
use screens::Notice;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", Notice::from_error(&e));
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Backend: {}", config.api_url);
    tracing::debug!("Session file: {:?}", config.session_path);

    match cli::run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", Notice::from_error(&e));
            ExitCode::FAILURE
        }
    }
}
