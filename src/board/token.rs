//! Tokens and their position state.
//!
//! A token is always in exactly one of three states:
//!
//! - `Home`: parked at its owner's start, no index
//! - `OnTrack(r)`: on the shared ring, `0 <= r < total_track_fields`
//! - `Finished(r)`: in the owner's private finish stretch,
//!   `total_track_fields <= r < total_fields_with_finish`
//!
//! Indices are relative to the owner's seat; the absolute ring index is
//! only defined on the track and is computed by the match, which knows
//! the seat offsets.

use serde::{Deserialize, Serialize};

use crate::core::{SeatId, TokenId};

/// Position of a token relative to its owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Not yet on the track.
    #[default]
    Home,
    /// On the shared ring at a relative index.
    OnTrack(usize),
    /// In the private finish stretch at a relative index.
    Finished(usize),
}

impl Position {
    /// Position for a relative index, given the ring length.
    #[must_use]
    pub fn at(relative: usize, total_track_fields: usize) -> Self {
        if relative >= total_track_fields {
            Position::Finished(relative)
        } else {
            Position::OnTrack(relative)
        }
    }

    /// Relative index, `None` at home.
    #[must_use]
    pub fn relative_index(self) -> Option<usize> {
        match self {
            Position::Home => None,
            Position::OnTrack(r) | Position::Finished(r) => Some(r),
        }
    }

    #[must_use]
    pub fn is_home(self) -> bool {
        matches!(self, Position::Home)
    }

    #[must_use]
    pub fn is_on_track(self) -> bool {
        matches!(self, Position::OnTrack(_))
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Position::Finished(_))
    }
}

/// A single movable piece.
///
/// The owner is fixed at creation. Position changes only through the
/// movement rules on [`Match`](super::Match).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    position: Position,
}

impl Token {
    /// Create a token at home.
    #[must_use]
    pub fn new(id: TokenId) -> Self {
        Self {
            id,
            position: Position::Home,
        }
    }

    #[must_use]
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Owning seat.
    #[must_use]
    pub fn owner(&self) -> SeatId {
        self.id.seat
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.id.letter()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn relative_index(&self) -> Option<usize> {
        self.position.relative_index()
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.position.is_home()
    }

    #[must_use]
    pub fn is_on_track(&self) -> bool {
        self.position.is_on_track()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position.is_finished()
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
