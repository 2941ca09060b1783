//! Terminal tic-tac-toe.
//!
//! The game rules live in [`tictactoe_core`]; this crate wires them to a
//! terminal.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with CLI overrides
//! - **Controller**: single actor owning the engine, schedules delayed AI turns
//! - **TUI**: ratatui renderer fed by engine events
//!
//! # Example
//!
//! ```no_run
//! use tictactoe::{GameConfig, run_tui};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::load_or_default("tictactoe.toml")?;
//! run_tui(config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod tui;

pub use config::{ConfigError, GameConfig};
pub use controller::{Command, Controller, ControllerHandle};
pub use tui::{App, InputAction, action_for_key, move_cursor, run_tui};
