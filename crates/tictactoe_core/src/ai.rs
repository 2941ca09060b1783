//! Heuristic AI opponent.
//!
//! A fixed priority cascade with one ply of lookahead:
//!
//! 1. complete a line of our own,
//! 2. block the opponent's open line,
//! 3. take the center,
//! 4. take a random empty corner,
//! 5. take any random empty square.
//!
//! Rules 1 and 2 scan squares in index order and play the first hit, so the
//! tactical part is fully deterministic. Only the fallbacks consult the
//! [`RandomSource`].

use super::position::Position;
use super::rng::RandomSource;
use super::rules::completing_move;
use super::types::{Board, Player};
use tracing::{debug, instrument};

/// Which rule of the cascade produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AiRule {
    /// Completes a line for the AI.
    #[display("win")]
    Win,
    /// Blocks a line the opponent could complete next move.
    #[display("block")]
    Block,
    /// Takes the empty center.
    #[display("center")]
    Center,
    /// Random empty corner.
    #[display("corner")]
    Corner,
    /// Random empty square.
    #[display("any")]
    Any,
}

/// A chosen square and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct AiDecision {
    /// Square to play.
    pub position: Position,
    /// Rule that fired.
    pub rule: AiRule,
}

/// Picks a move for `ai` on `board`.
///
/// Returns `None` only when the board has no empty square.
#[instrument(skip(board, rng), fields(ai = %ai))]
pub fn choose_move<R: RandomSource + ?Sized>(
    board: &Board,
    ai: Player,
    rng: &mut R,
) -> Option<AiDecision> {
    let decision = if let Some(pos) = completing_move(board, ai) {
        AiDecision::new(pos, AiRule::Win)
    } else if let Some(pos) = completing_move(board, ai.opponent()) {
        AiDecision::new(pos, AiRule::Block)
    } else if board.is_empty(Position::Center) {
        AiDecision::new(Position::Center, AiRule::Center)
    } else {
        let corners: Vec<Position> = Position::CORNERS
            .iter()
            .copied()
            .filter(|&pos| board.is_empty(pos))
            .collect();
        if corners.is_empty() {
            let open = board.empty_positions();
            if open.is_empty() {
                debug!("No empty square left");
                return None;
            }
            AiDecision::new(open[rng.pick_index(open.len())], AiRule::Any)
        } else {
            AiDecision::new(corners[rng.pick_index(corners.len())], AiRule::Corner)
        }
    };

    debug!(position = %decision.position, rule = %decision.rule, "AI chose position");
    Some(decision)
}
