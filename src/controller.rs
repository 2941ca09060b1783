//! Single-actor controller that owns a game engine.
//!
//! Commands arrive on one channel and are handled to completion one at a
//! time. The AI's reply to a human move is delayed by a timer task that
//! posts [`Command::AiTurn`] back onto the same channel, tagged with the
//! engine session it was scheduled for.

use anyhow::{Context, Result};
use std::ops::ControlFlow;
use std::time::Duration;
use tictactoe_core::{
    GameEngine, GameEvent, GameMode, MoveError, Position, RandomSource, SeededRandom, SessionId,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::config::GameConfig;

/// Requests the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Human plays a square.
    Move(Position),
    /// Switch to the given mode and start over.
    SetMode(GameMode),
    /// Switch to the other mode and start over.
    ToggleMode,
    /// Clear the board.
    ResetGame,
    /// Zero the score.
    ResetScore,
    /// Delayed AI turn for the given session.
    AiTurn {
        /// Session current when the turn was scheduled.
        session: SessionId,
    },
    /// Stop the controller.
    Quit,
}

/// Cloneable sender for submitting commands.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl ControllerHandle {
    /// Sends a command to the controller.
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(command)
            .context("Controller is no longer running")
    }
}

/// Owns a [`GameEngine`] and forwards its events to a renderer.
pub struct Controller<R: RandomSource = SeededRandom> {
    engine: GameEngine,
    rng: R,
    ai_delay: Duration,
    tx: mpsc::UnboundedSender<Command>,
    rx: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<GameEvent>,
    pending_ai: Option<JoinHandle<()>>,
}

impl Controller<SeededRandom> {
    /// Builds a controller from configuration.
    ///
    /// Uses the configured seed when present, otherwise OS entropy.
    #[instrument(skip(events))]
    pub fn from_config(
        config: &GameConfig,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> (Self, ControllerHandle) {
        let rng = match config.seed() {
            Some(seed) => SeededRandom::new(*seed),
            None => SeededRandom::from_entropy(),
        };
        info!(seed = rng.seed(), "AI random source ready");
        Self::new(*config.mode(), config.ai_delay(), rng, events)
    }
}

impl<R: RandomSource> Controller<R> {
    /// Creates a controller and the handle used to drive it.
    pub fn new(
        mode: GameMode,
        ai_delay: Duration,
        rng: R,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> (Self, ControllerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ControllerHandle { tx: tx.clone() };
        let controller = Self {
            engine: GameEngine::new(mode),
            rng,
            ai_delay,
            tx,
            rx,
            events,
            pending_ai: None,
        };
        (controller, handle)
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Whether an AI turn is waiting on its timer.
    pub fn has_pending_ai(&self) -> bool {
        self.pending_ai
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Announces the table, then processes commands until [`Command::Quit`].
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<()> {
        info!("Controller started");
        self.engine.announce();
        self.flush()?;

        while let Some(command) = self.rx.recv().await {
            if self.handle(command)?.is_break() {
                break;
            }
        }

        self.cancel_ai();
        info!("Controller stopped");
        Ok(())
    }

    /// Handles one command to completion.
    ///
    /// # Errors
    ///
    /// Fails only when the event receiver has been dropped.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> Result<ControlFlow<()>> {
        match command {
            Command::Move(pos) => self.human_move(pos),
            Command::SetMode(mode) => {
                self.cancel_ai();
                self.engine.set_mode(mode);
            }
            Command::ToggleMode => {
                self.cancel_ai();
                let mode = self.engine.mode().toggle();
                self.engine.set_mode(mode);
            }
            Command::ResetGame => {
                self.cancel_ai();
                self.engine.reset_game();
            }
            Command::ResetScore => self.engine.reset_score(),
            Command::AiTurn { session } => self.ai_turn(session),
            Command::Quit => {
                info!("Quit requested");
                return Ok(ControlFlow::Break(()));
            }
        }
        self.flush()?;
        Ok(ControlFlow::Continue(()))
    }

    fn human_move(&mut self, pos: Position) {
        if self.engine.is_ai_turn() {
            debug!(%pos, "Ignoring input while the AI is to move");
            return;
        }
        match self.engine.apply_move(pos) {
            Ok(outcome) => {
                debug!(?outcome, "Human move accepted");
                if self.engine.is_ai_turn() {
                    self.schedule_ai();
                }
            }
            Err(e) => debug!(error = %e, "Human move rejected"),
        }
    }

    fn ai_turn(&mut self, session: SessionId) {
        if let Some(task) = self.pending_ai.take() {
            task.abort();
        }
        match self.engine.ai_move(session, &mut self.rng) {
            Ok((decision, outcome)) => {
                info!(
                    position = %decision.position,
                    rule = %decision.rule,
                    ?outcome,
                    "AI moved"
                );
            }
            Err(MoveError::StaleSession { expected, found }) => {
                debug!(expected, found, "Discarded stale AI turn");
            }
            Err(e) => warn!(error = %e, "AI turn skipped"),
        }
    }

    fn schedule_ai(&mut self) {
        self.cancel_ai();
        let session = self.engine.session();
        let delay = self.ai_delay;
        let tx = self.tx.clone();
        debug!(session, ?delay, "Scheduling AI turn");

        self.pending_ai = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(Command::AiTurn { session }).is_err() {
                debug!("Controller gone before AI turn fired");
            }
        }));
    }

    fn cancel_ai(&mut self) {
        if let Some(task) = self.pending_ai.take() {
            debug!("Cancelling pending AI turn");
            task.abort();
        }
    }

    fn flush(&mut self) -> Result<()> {
        for event in self.engine.drain_events() {
            self.events
                .send(event)
                .context("Renderer stopped listening for events")?;
        }
        Ok(())
    }
}

impl<R: RandomSource> Drop for Controller<R> {
    fn drop(&mut self) {
        self.cancel_ai();
    }
}
