//! tictactoe - terminal tic-tac-toe.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tictactoe::{GameConfig, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Loading {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            mode,
            seed,
            ai_delay_ms,
        } => {
            let mut config = config;
            if let Some(mode) = mode {
                config = config.with_mode(mode);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(ms) = ai_delay_ms {
                config = config.with_ai_delay_ms(ms);
            }
            init_file_logging(config.log_file())?;
            info!(?config, "Starting game");
            run_tui(config).await
        }
        Command::Config => {
            init_stderr_logging();
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to a file so output does not interfere with the TUI.
fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Creating log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
