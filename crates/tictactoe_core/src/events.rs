//! Notifications for rendering collaborators.

use super::position::Position;
use super::score::Score;
use super::types::{GameMode, Player};
use serde::{Deserialize, Serialize};

/// A change a renderer should reflect.
///
/// The engine queues these as it mutates state; callers drain them with
/// [`GameEngine::drain_events`](super::GameEngine::drain_events).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A square received a mark.
    CellChanged {
        /// The square that changed.
        position: Position,
        /// The mark now on it.
        mark: Player,
    },
    /// Every square was cleared.
    BoardReset,
    /// A completed line to highlight.
    LineHighlighted([Position; 3]),
    /// Text for the status bar.
    StatusMessage(String),
    /// New score totals.
    ScoreChanged(Score),
    /// The player to move changed.
    TurnChanged(Player),
    /// The game mode changed.
    ModeChanged(GameMode),
}
