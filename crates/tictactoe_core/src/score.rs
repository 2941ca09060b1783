//! Running tally of finished games.

use super::types::{Outcome, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Win and draw counters kept across game resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    /// Games won by X.
    pub x_wins: u32,
    /// Games won by O.
    pub o_wins: u32,
    /// Drawn games.
    pub draws: u32,
}

impl Score {
    /// Creates a zeroed score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished game.
    #[instrument]
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Won {
                winner: Player::X, ..
            } => self.x_wins = self.x_wins.saturating_add(1),
            Outcome::Won {
                winner: Player::O, ..
            } => self.o_wins = self.o_wins.saturating_add(1),
            Outcome::Draw => self.draws = self.draws.saturating_add(1),
        }
    }

    /// Wins for the given player.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.x_wins
            .saturating_add(self.o_wins)
            .saturating_add(self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WINNING_LINES;

    #[test]
    fn test_record_each_outcome() {
        let mut score = Score::new();
        score.record(&Outcome::Won {
            winner: Player::X,
            line: WINNING_LINES[0],
        });
        score.record(&Outcome::Won {
            winner: Player::O,
            line: WINNING_LINES[6],
        });
        score.record(&Outcome::Won {
            winner: Player::O,
            line: WINNING_LINES[3],
        });
        score.record(&Outcome::Draw);

        assert_eq!(score.wins(Player::X), 1);
        assert_eq!(score.wins(Player::O), 2);
        assert_eq!(score.draws, 1);
        assert_eq!(score.games(), 4);
    }

    #[test]
    fn test_counters_saturate() {
        let mut score = Score {
            x_wins: u32::MAX,
            o_wins: u32::MAX,
            draws: 1,
        };
        score.record(&Outcome::Won {
            winner: Player::X,
            line: WINNING_LINES[0],
        });
        assert_eq!(score.x_wins, u32::MAX);
        assert_eq!(score.games(), u32::MAX);
    }
}
