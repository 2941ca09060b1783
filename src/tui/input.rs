//! Keyboard handling.

use crate::controller::Command;
use crossterm::event::KeyCode;
use tictactoe_core::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Move the cursor.
    Cursor(Position),
    /// Forward a command to the controller.
    Send(Command),
    /// Leave the UI.
    Quit,
}

/// Maps a key press to an action given the current cursor.
pub fn action_for_key(key: KeyCode, cursor: Position) -> Option<InputAction> {
    match key {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(InputAction::Cursor(move_cursor(cursor, key)))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputAction::Send(Command::Move(cursor))),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|digit| Position::from_index(digit as usize - 1))
            .map(|pos| InputAction::Send(Command::Move(pos))),
        KeyCode::Char('m') => Some(InputAction::Send(Command::ToggleMode)),
        KeyCode::Char('r') => Some(InputAction::Send(Command::ResetGame)),
        KeyCode::Char('s') => Some(InputAction::Send(Command::ResetScore)),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
