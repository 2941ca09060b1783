//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from nine squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the empty positions in index order.
    #[instrument(skip(self))]
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Who controls the two marks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
pub enum GameMode {
    /// Two humans share the board.
    #[serde(rename = "pvp")]
    #[strum(serialize = "pvp")]
    PlayerVsPlayer,
    /// The human plays X, the heuristic AI plays O.
    #[default]
    #[serde(rename = "pvai")]
    #[strum(serialize = "pvai")]
    PlayerVsAi,
}

impl GameMode {
    /// Mark controlled by the AI in this mode.
    pub fn ai_player(self) -> Option<Player> {
        match self {
            GameMode::PlayerVsPlayer => None,
            GameMode::PlayerVsAi => Some(Player::O),
        }
    }

    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "Player vs Player",
            GameMode::PlayerVsAi => "Player vs AI",
        }
    }

    /// Switches to the other mode.
    pub fn toggle(self) -> Self {
        match self {
            GameMode::PlayerVsPlayer => GameMode::PlayerVsAi,
            GameMode::PlayerVsAi => GameMode::PlayerVsPlayer,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Won {
        /// The winning player.
        winner: Player,
        /// The completed line, for highlighting.
        line: [Position; 3],
    },
    /// The board filled with no winner.
    Draw,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Game continues with the given player to move.
    Continue {
        /// Player whose turn it now is.
        next: Player,
    },
    /// The move ended the game.
    Finished(Outcome),
}

/// Errors returned when a move is rejected.
///
/// A rejected move leaves the board, turn, and score untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,
    /// The target square already holds a mark.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),
    /// The raw index is outside 0-8.
    #[display("Position {_0} out of bounds (must be 0-8)")]
    OutOfBounds(#[error(not(source))] usize),
    /// The AI was asked to move when it does not control the current mark.
    #[display("Not the AI's turn")]
    NotAiTurn,
    /// A scheduled AI turn outlived the board it was scheduled for.
    #[display("Stale AI turn for session {found} (current session {expected})")]
    StaleSession {
        /// Session currently held by the engine.
        expected: u64,
        /// Session the AI turn was scheduled for.
        found: u64,
    },
    /// No empty square is left to play.
    #[display("No move available")]
    NoMoveAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
    }

    #[test]
    fn test_board_display() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::Center, Square::Occupied(Player::O));
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_mode_parse_and_toggle() {
        assert_eq!(GameMode::from_str("pvp"), Ok(GameMode::PlayerVsPlayer));
        assert_eq!(GameMode::from_str("pvai"), Ok(GameMode::PlayerVsAi));
        assert!(GameMode::from_str("minimax").is_err());
        assert_eq!(GameMode::PlayerVsAi.toggle(), GameMode::PlayerVsPlayer);
        assert_eq!(GameMode::PlayerVsAi.ai_player(), Some(Player::O));
        assert_eq!(GameMode::PlayerVsPlayer.ai_player(), None);
    }

    #[test]
    fn test_move_error_messages() {
        assert_eq!(
            MoveError::SquareOccupied(Position::Center).to_string(),
            "Square Center is already occupied"
        );
        assert_eq!(
            MoveError::OutOfBounds(9).to_string(),
            "Position 9 out of bounds (must be 0-8)"
        );
    }
}
