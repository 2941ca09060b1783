//! Renderer-side view of the table.

use tictactoe_core::{GameEvent, GameMode, Player, Position, Score};
use tracing::debug;

/// Everything the UI draws, rebuilt from [`GameEvent`]s.
#[derive(Debug, Clone)]
pub struct App {
    cells: [Option<Player>; 9],
    highlight: Option<[Position; 3]>,
    status_message: String,
    score: Score,
    turn: Player,
    mode: GameMode,
    cursor: Position,
}

impl App {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            highlight: None,
            status_message: "Waiting for game to start...".to_string(),
            score: Score::new(),
            turn: Player::X,
            mode: GameMode::default(),
            cursor: Position::Center,
        }
    }

    /// Mark on the given square, if any.
    pub fn cell(&self, pos: Position) -> Option<Player> {
        self.cells[pos.to_index()]
    }

    /// Whether the square is part of the winning line.
    pub fn is_highlighted(&self, pos: Position) -> bool {
        self.highlight.is_some_and(|line| line.contains(&pos))
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Current score totals.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the keyboard cursor.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Applies a game event from the controller.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::CellChanged { position, mark } => {
                self.cells[position.to_index()] = Some(mark);
            }
            GameEvent::BoardReset => {
                self.cells = [None; 9];
                self.highlight = None;
            }
            GameEvent::LineHighlighted(line) => self.highlight = Some(line),
            GameEvent::StatusMessage(message) => self.status_message = message,
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::TurnChanged(player) => self.turn = player,
            GameEvent::ModeChanged(mode) => self.mode = mode,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
