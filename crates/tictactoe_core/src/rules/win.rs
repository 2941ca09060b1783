//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// The eight lines that end the game: rows, then columns, then diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Win {
    /// Player holding all three squares.
    pub player: Player,
    /// The completed line.
    pub line: [Position; 3],
}

/// Checks if there is a winner on the board.
///
/// Returns the first completed line in [`WINNING_LINES`] order. A single
/// move can complete at most one new line, so order only matters for
/// boards assembled by hand.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Win> {
    WINNING_LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match board.get(a) {
            Square::Occupied(player)
                if board.get(b) == Square::Occupied(player)
                    && board.get(c) == Square::Occupied(player) =>
            {
                Some(Win::new(player, line))
            }
            _ => None,
        }
    })
}

/// Finds the first empty square (in index order) that would complete a
/// line for `player`.
#[instrument(skip(board))]
pub fn completing_move(board: &Board, player: Player) -> Option<Position> {
    Position::ALL.iter().copied().find(|&pos| {
        board.is_empty(pos)
            && WINNING_LINES
                .iter()
                .filter(|line| line.contains(&pos))
                .any(|line| {
                    line.iter()
                        .filter(|&&other| other != pos)
                        .all(|&other| board.get(other) == Square::Occupied(player))
                })
    })
}
