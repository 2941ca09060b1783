//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_core::GameMode;

/// Tic-tac-toe against a friend or a heuristic AI
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe with a heuristic AI opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Starting mode: pvp or pvai
        #[arg(long)]
        mode: Option<GameMode>,

        /// Seed for the AI's random tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Pause before the AI answers, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,
}
