//! Homework bot CLI
//!
//! Long-running daemon; every flag is optional.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::logging::init_logging;
use homework_bot::{load_config, Config, HomeworkBotBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Relays homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file path (overrides config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Before logging init, so RUST_LOG can come from .env
    let dotenv = dotenvy::dotenv();

    let mut config = match &args.config {
        Some(config_path) => load_config(config_path)?,
        None => Config::default(),
    };

    if let Some(log_file) = args.log_file {
        config.log_file = Some(log_file);
    }

    let _log_guard = init_logging(args.log_level, config.log_file.as_deref())?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env: {}", e),
    }

    if let Err(e) = config.resolve_secrets() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, retry interval: {}s",
        config.endpoint,
        config.retry_interval_seconds
    );

    let bot = HomeworkBotBuilder::new(config).build().inspect_err(|e| {
        tracing::error!("Failed to build homework bot: {}", e);
    })?;
    bot.start().await?;

    Ok(())
}
