//! Tic-tac-toe game logic.
//!
//! Pure, synchronous rules for a 3x3 board plus a heuristic AI opponent.
//! Nothing here performs I/O; renderers learn about state changes by
//! draining [`GameEvent`]s from a [`GameEngine`].
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameEngine, GameMode, MoveOutcome, Player, Position, SeededRandom};
//!
//! let mut engine = GameEngine::new(GameMode::PlayerVsAi);
//! engine.apply_move(Position::TopLeft).unwrap();
//!
//! let mut rng = SeededRandom::new(7);
//! let (decision, outcome) = engine.ai_move(engine.session(), &mut rng).unwrap();
//! assert_eq!(decision.position, Position::Center);
//! assert_eq!(outcome, MoveOutcome::Continue { next: Player::X });
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod engine;
mod events;
mod position;
mod rng;
pub mod rules;
mod score;
mod types;

pub use ai::{AiDecision, AiRule, choose_move};
pub use engine::{GameEngine, SessionId};
pub use events::GameEvent;
pub use position::Position;
pub use rng::{RandomSource, SeededRandom};
pub use rules::{WINNING_LINES, Win, check_winner, is_draw, is_full};
pub use score::Score;
pub use types::{Board, GameMode, MoveError, MoveOutcome, Outcome, Player, Square};
