//! Game engine: board, turn, mode, and score behind one owner.

use super::ai::{AiDecision, choose_move};
use super::events::GameEvent;
use super::position::Position;
use super::rng::RandomSource;
use super::rules::{check_winner, is_full};
use super::score::Score;
use super::types::{Board, GameMode, MoveError, MoveOutcome, Outcome, Player, Square};
use tracing::{debug, info, instrument, warn};

/// Identifies one board lifetime. Bumped on every game reset.
pub type SessionId = u64;

/// Complete state of one tic-tac-toe table.
///
/// All mutation goes through the methods below, which validate input and
/// queue [`GameEvent`]s for whoever renders the table. Rejected operations
/// return an error and queue nothing.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    current: Player,
    mode: GameMode,
    active: bool,
    outcome: Option<Outcome>,
    score: Score,
    session: SessionId,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Creates an engine with an empty board, X to move.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            current: Player::X,
            mode,
            active: true,
            outcome: None,
            score: Score::new(),
            session: 0,
            events: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Returns the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Whether moves are still accepted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How the game ended, once it has.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Returns the running score.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Returns the current session.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// True when the game is live and the AI holds the mark to move.
    pub fn is_ai_turn(&self) -> bool {
        self.active && self.mode.ai_player() == Some(self.current)
    }

    /// Takes all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queues events describing the whole table, for a renderer that is
    /// attaching late.
    #[instrument(skip(self))]
    pub fn announce(&mut self) {
        self.events.push(GameEvent::ModeChanged(self.mode));
        self.events.push(GameEvent::BoardReset);
        for pos in Position::ALL {
            if let Square::Occupied(mark) = self.board.get(pos) {
                self.events.push(GameEvent::CellChanged { position: pos, mark });
            }
        }
        if let Some(Outcome::Won { line, .. }) = self.outcome {
            self.events.push(GameEvent::LineHighlighted(line));
        }
        self.events.push(GameEvent::TurnChanged(self.current));
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.push_status();
    }

    /// Applies a move from a raw board index.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] for indices above 8, otherwise the
    /// same errors as [`apply_move`](Self::apply_move).
    #[instrument(skip(self))]
    pub fn apply_index(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        let pos = Position::from_index(index).ok_or_else(|| {
            warn!(index, "Rejected out-of-bounds move");
            MoveError::OutOfBounds(index)
        })?;
        self.apply_move(pos)
    }

    /// Places the current player's mark.
    ///
    /// Checks for a win first, then for a draw. A finished game records its
    /// outcome in the score exactly once and stops accepting moves. Otherwise
    /// the turn passes to the other player.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] if the game has ended or
    /// [`MoveError::SquareOccupied`] if the square holds a mark. Both leave
    /// the state untouched.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn apply_move(&mut self, pos: Position) -> Result<MoveOutcome, MoveError> {
        if !self.active {
            warn!(%pos, "Rejected move on finished game");
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            warn!(%pos, "Rejected move on occupied square");
            return Err(MoveError::SquareOccupied(pos));
        }

        let player = self.current;
        self.board.set(pos, Square::Occupied(player));
        self.events.push(GameEvent::CellChanged {
            position: pos,
            mark: player,
        });
        debug!(%pos, board = %self.board.display(), "Move applied");

        let outcome = if let Some(win) = check_winner(&self.board) {
            Some(Outcome::Won {
                winner: win.player,
                line: win.line,
            })
        } else if is_full(&self.board) {
            Some(Outcome::Draw)
        } else {
            None
        };

        match outcome {
            Some(outcome) => {
                self.finish(outcome);
                Ok(MoveOutcome::Finished(outcome))
            }
            None => {
                self.current = player.opponent();
                self.events.push(GameEvent::TurnChanged(self.current));
                self.push_status();
                Ok(MoveOutcome::Continue { next: self.current })
            }
        }
    }

    /// Lets the AI play for the given session.
    ///
    /// `session` is the value of [`session`](Self::session) when the turn was
    /// scheduled; a reset since then makes the turn stale.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::StaleSession`] for a turn scheduled before the
    /// last reset, [`MoveError::GameOver`] if the game has ended,
    /// [`MoveError::NotAiTurn`] if the AI does not hold the mark to move, and
    /// [`MoveError::NoMoveAvailable`] if the board is full.
    #[instrument(skip(self, rng))]
    pub fn ai_move<R: RandomSource + ?Sized>(
        &mut self,
        session: SessionId,
        rng: &mut R,
    ) -> Result<(AiDecision, MoveOutcome), MoveError> {
        if session != self.session {
            warn!(
                expected = self.session,
                found = session,
                "Dropping stale AI turn"
            );
            return Err(MoveError::StaleSession {
                expected: self.session,
                found: session,
            });
        }
        if !self.active {
            return Err(MoveError::GameOver);
        }
        let ai = self
            .mode
            .ai_player()
            .filter(|&ai| ai == self.current)
            .ok_or(MoveError::NotAiTurn)?;

        let decision = choose_move(&self.board, ai, rng).ok_or(MoveError::NoMoveAvailable)?;
        let outcome = self.apply_move(decision.position)?;
        Ok((decision, outcome))
    }

    /// Switches mode and starts a fresh game. The score is kept.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Changing game mode");
        self.mode = mode;
        self.events.push(GameEvent::ModeChanged(mode));
        self.reset_game();
    }

    /// Clears the board and gives X the move. The score is kept.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.board = Board::new();
        self.current = Player::X;
        self.active = true;
        self.outcome = None;
        self.session = self.session.wrapping_add(1);
        info!(session = self.session, "Game reset");

        self.events.push(GameEvent::BoardReset);
        self.events.push(GameEvent::TurnChanged(self.current));
        self.push_status();
    }

    /// Zeroes the score. The board is kept.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) {
        info!("Score reset");
        self.score = Score::new();
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Status-bar text for the current state.
    pub fn status_message(&self) -> String {
        let ai = self.mode.ai_player();
        match (self.outcome, ai) {
            (Some(Outcome::Draw), _) => "It's a draw!".to_string(),
            (Some(Outcome::Won { winner, .. }), None) => format!("Player {winner} wins!"),
            (Some(Outcome::Won { winner, .. }), Some(ai)) if winner == ai => {
                "AI wins!".to_string()
            }
            (Some(Outcome::Won { .. }), Some(_)) => "You win!".to_string(),
            (None, None) => format!("Player {}'s turn", self.current),
            (None, Some(ai)) if ai == self.current => "AI is thinking...".to_string(),
            (None, Some(_)) => "Your turn".to_string(),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.active = false;
        self.outcome = Some(outcome);
        self.score.record(&outcome);
        info!(?outcome, score = ?self.score, "Game finished");

        if let Outcome::Won { line, .. } = outcome {
            self.events.push(GameEvent::LineHighlighted(line));
        }
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.push_status();
    }

    fn push_status(&mut self) {
        self.events.push(GameEvent::StatusMessage(self.status_message()));
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiRule;
    use crate::rng::SeededRandom;

    fn play(engine: &mut GameEngine, moves: &[usize]) {
        for &index in moves {
            engine.apply_index(index).unwrap();
        }
    }

    #[test]
    fn test_new_engine_state() {
        let engine = GameEngine::new(GameMode::PlayerVsPlayer);
        assert!(engine.is_active());
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.board(), &Board::new());
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.score(), &Score::new());
    }

    #[test]
    fn test_move_queues_cell_turn_and_status() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        let outcome = engine.apply_move(Position::Center).unwrap();
        assert_eq!(outcome, MoveOutcome::Continue { next: Player::O });
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::CellChanged {
                    position: Position::Center,
                    mark: Player::X
                },
                GameEvent::TurnChanged(Player::O),
                GameEvent::StatusMessage("Player O's turn".to_string()),
            ]
        );
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_win_highlights_line_and_scores() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        play(&mut engine, &[0, 3, 1, 4]);
        engine.drain_events();

        let outcome = engine.apply_index(2).unwrap();
        let line = [Position::TopLeft, Position::TopCenter, Position::TopRight];
        assert_eq!(
            outcome,
            MoveOutcome::Finished(Outcome::Won {
                winner: Player::X,
                line
            })
        );
        assert!(!engine.is_active());
        assert_eq!(engine.score().x_wins, 1);

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::LineHighlighted(line)));
        assert!(events.contains(&GameEvent::StatusMessage("Player X wins!".to_string())));
    }

    #[test]
    fn test_win_on_last_square_is_not_a_draw() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        // X O X / O X O / O X X with X's last move at 8 completing the diagonal.
        play(&mut engine, &[0, 1, 2, 3, 4, 5, 7, 6]);
        let outcome = engine.apply_index(8).unwrap();
        assert!(matches!(
            outcome,
            MoveOutcome::Finished(Outcome::Won {
                winner: Player::X,
                ..
            })
        ));
        assert_eq!(engine.score().draws, 0);
    }

    #[test]
    fn test_draw() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        play(&mut engine, &[0, 4, 8, 1, 7, 6, 2, 5]);
        let outcome = engine.apply_index(3).unwrap();
        assert_eq!(outcome, MoveOutcome::Finished(Outcome::Draw));
        assert_eq!(engine.score().draws, 1);
        assert_eq!(engine.status_message(), "It's a draw!");
    }

    #[test]
    fn test_rejected_moves_change_nothing() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        engine.apply_move(Position::Center).unwrap();
        engine.drain_events();
        let before = engine.board().clone();

        assert_eq!(
            engine.apply_move(Position::Center),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!(engine.apply_index(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.current_player(), Player::O);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_reset_game_keeps_score_and_bumps_session() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        play(&mut engine, &[0, 3, 1, 4, 2]);
        let session = engine.session();

        engine.reset_game();
        assert!(engine.is_active());
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(engine.board(), &Board::new());
        assert_eq!(engine.score().x_wins, 1);
        assert_eq!(engine.session(), session + 1);
    }

    #[test]
    fn test_reset_score_keeps_board() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        play(&mut engine, &[0, 3, 1, 4, 2]);
        engine.reset_score();
        assert_eq!(engine.score(), &Score::new());
        assert!(!engine.board().is_empty(Position::TopLeft));
        assert!(!engine.is_active());
    }

    #[test]
    fn test_set_mode_resets_board() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        play(&mut engine, &[4]);
        engine.drain_events();

        engine.set_mode(GameMode::PlayerVsAi);
        assert_eq!(engine.mode(), GameMode::PlayerVsAi);
        assert_eq!(engine.board(), &Board::new());
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::ModeChanged(GameMode::PlayerVsAi),
                GameEvent::BoardReset,
                GameEvent::TurnChanged(Player::X),
                GameEvent::StatusMessage("Your turn".to_string()),
            ]
        );
    }

    #[test]
    fn test_ai_move_checks_turn_and_session() {
        let mut engine = GameEngine::new(GameMode::PlayerVsAi);
        let mut rng = SeededRandom::new(1);
        let session = engine.session();

        assert_eq!(
            engine.ai_move(session, &mut rng),
            Err(MoveError::NotAiTurn)
        );

        engine.apply_move(Position::TopLeft).unwrap();
        assert!(engine.is_ai_turn());
        assert_eq!(engine.status_message(), "AI is thinking...");

        let (decision, outcome) = engine.ai_move(session, &mut rng).unwrap();
        assert_eq!(decision.position, Position::Center);
        assert_eq!(decision.rule, AiRule::Center);
        assert_eq!(outcome, MoveOutcome::Continue { next: Player::X });

        engine.apply_move(Position::TopCenter).unwrap();
        engine.reset_game();
        assert_eq!(
            engine.ai_move(session, &mut rng),
            Err(MoveError::StaleSession {
                expected: session + 1,
                found: session
            })
        );
        assert_eq!(engine.board(), &Board::new());
    }

    #[test]
    fn test_ai_move_rejected_in_pvp() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        engine.apply_move(Position::Center).unwrap();
        assert!(!engine.is_ai_turn());
        assert_eq!(
            engine.ai_move(engine.session(), &mut SeededRandom::new(3)),
            Err(MoveError::NotAiTurn)
        );
    }

    #[test]
    fn test_ai_takes_corner_once_center_is_held() {
        let mut engine = GameEngine::new(GameMode::PlayerVsAi);
        let mut rng = SeededRandom::new(5);
        engine.apply_index(1).unwrap();
        engine.ai_move(engine.session(), &mut rng).unwrap();
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Player::O));

        // Column 1 is already blocked by the center, so nothing is urgent.
        engine.apply_index(7).unwrap();
        let (decision, _) = engine.ai_move(engine.session(), &mut rng).unwrap();
        assert_eq!(decision.rule, AiRule::Corner);
        assert!(decision.position.is_corner());
    }

    #[test]
    fn test_announce_describes_table() {
        let mut engine = GameEngine::new(GameMode::PlayerVsPlayer);
        play(&mut engine, &[0]);
        engine.drain_events();
        engine.announce();
        let events = engine.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::ModeChanged(GameMode::PlayerVsPlayer)));
        assert!(events.contains(&GameEvent::CellChanged {
            position: Position::TopLeft,
            mark: Player::X
        }));
        assert!(events.contains(&GameEvent::ScoreChanged(Score::new())));
        assert_eq!(
            events.last(),
            Some(&GameEvent::StatusMessage("Player O's turn".to_string()))
        );
    }
}
