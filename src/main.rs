//! Vectra CLI: runs CRUD screens over JSON datasets.
//!
//! Wires configuration, logging, the plugin provider, and the built-in
//! plugins together, then dispatches the subcommand.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use vectra_core::config::AppConfig;
use vectra_core::error::AppError;

mod commands;
mod output;
mod screen;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        tracing::error!(kind = %e.kind, "Command failed: {}", e.message);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file, the `VECTRA_ENV` overlay, and environment
fn load_configuration(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("VECTRA_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Initialize tracing/logging. Logs go to stderr so JSON output on stdout
/// stays parseable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    tracing::debug!(level = %config.logging.level, format = %config.logging.format, "Logging initialized");
}
