//! Turn events and match results.

use serde::{Deserialize, Serialize};

use crate::core::{SeatId, SeatMap, TokenId};

/// Phase of a turn a roll was made in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Rolling to bring the first token out of home.
    HomeExit,
    /// Regular movement; rolling the highest face rolls again.
    Movement,
}

/// Something rule-relevant that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    TurnStarted { turn: u32, seat: SeatId },
    Rolled { seat: SeatId, phase: Phase, roll: u32 },
    Exited { token: TokenId, captured: Option<TokenId> },
    Advanced { token: TokenId, from: usize, to: usize, captured: Option<TokenId> },
    NoMove { seat: SeatId, roll: u32 },
    Finished { seat: SeatId, rank: u8 },
    MatchOver,
}

/// Final ranking of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    ranks: SeatMap<u8>,
}

impl Standings {
    pub(crate) fn new(ranks: SeatMap<u8>) -> Self {
        Self { ranks }
    }

    /// Rank of a seat; 1 is the winner.
    #[must_use]
    pub fn rank(&self, seat: SeatId) -> u8 {
        self.ranks[seat]
    }

    /// Seats ordered from first to last place.
    #[must_use]
    pub fn podium(&self) -> Vec<SeatId> {
        let mut seats: Vec<_> = self.ranks.iter().map(|(seat, _)| seat).collect();
        seats.sort_by_key(|&seat| self.ranks[seat]);
        seats
    }

    /// Winner of the match.
    #[must_use]
    pub fn winner(&self) -> Option<SeatId> {
        self.podium().first().copied()
    }
}
