//! Movement and capture rules.
//!
//! Every move is evaluated first and committed second. `plan_exit` and
//! `plan_advance` only read the board and return a [`MovePlan`]
//! describing what the move would do; `apply` commits a plan. The
//! `attempt_exit` / `advance` wrappers combine both behind a `commit`
//! flag, with `commit = false` leaving the board untouched.
//!
//! ## Rules
//!
//! - A token leaves home onto relative field 0 with a roll of at least
//!   the highest dice face.
//! - A token on the board moves exactly the rolled distance. It may not
//!   move past the last finish slot; there is no bounce-back.
//! - Landing on an opposing token throws it out (back home). Landing on
//!   one's own token is not allowed.
//! - Finish slots are private: only the owner's tokens can be there.

use serde::{Deserialize, Serialize};

use crate::core::{SeatId, TokenId};

use super::game::Match;
use super::token::Position;

/// Which kind of move a plan describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Leave home onto relative field 0.
    Exit,
    /// Move forward along the track or finish stretch.
    Advance,
}

/// What a move would do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The token moves to relative index `to`, throwing out `captured`.
    Moved {
        to: usize,
        captured: Option<TokenId>,
    },
    /// An own token already stands on the target.
    Blocked { target: usize, by: TokenId },
    /// The target lies beyond the last finish slot.
    Overshoot { target: usize },
    /// The roll is too low to leave home.
    RollTooLow,
    /// The token is not in a state this move applies to.
    NotApplicable,
}

/// A move evaluated against the current board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub token: TokenId,
    pub kind: MoveKind,
    pub roll: u32,
    /// Position of the token when the plan was made.
    pub from: Position,
    pub outcome: MoveOutcome,
}

impl MovePlan {
    /// Whether the move is legal.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(self.outcome, MoveOutcome::Moved { .. })
    }

    /// New relative index, if the move is legal.
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        match self.outcome {
            MoveOutcome::Moved { to, .. } => Some(to),
            _ => None,
        }
    }

    /// Opposing token that would be thrown out.
    #[must_use]
    pub fn captured(&self) -> Option<TokenId> {
        match self.outcome {
            MoveOutcome::Moved { captured, .. } => captured,
            _ => None,
        }
    }
}

/// Whether `occupant` can be thrown out by a token of `mover`.
///
/// Own tokens are never thrown out; this is the same-owner block.
#[must_use]
pub fn can_throw_out(occupant: TokenId, mover: SeatId) -> bool {
    occupant.seat != mover
}

impl Match {
    /// Evaluate bringing a home token onto the track with `roll`.
    #[must_use]
    pub fn plan_exit(&self, token: TokenId, roll: u32) -> MovePlan {
        let from = self.token(token).position();
        let outcome = if !from.is_home() {
            MoveOutcome::NotApplicable
        } else if roll < self.config().min_exit_roll() {
            MoveOutcome::RollTooLow
        } else {
            self.landing(token.seat, 0)
        };

        MovePlan {
            token,
            kind: MoveKind::Exit,
            roll,
            from,
            outcome,
        }
    }

    /// Evaluate moving a token that is out of home forward by `roll`.
    #[must_use]
    pub fn plan_advance(&self, token: TokenId, roll: u32) -> MovePlan {
        let from = self.token(token).position();
        let outcome = match from.relative_index() {
            None => MoveOutcome::NotApplicable,
            Some(current) => {
                let target = current + roll as usize;
                if target >= self.config().total_fields_with_finish() {
                    MoveOutcome::Overshoot { target }
                } else {
                    self.landing(token.seat, target)
                }
            }
        };

        MovePlan {
            token,
            kind: MoveKind::Advance,
            roll,
            from,
            outcome,
        }
    }

    fn landing(&self, mover: SeatId, target: usize) -> MoveOutcome {
        match self.find_occupant(mover, target) {
            Some(occupant) if !can_throw_out(occupant, mover) => MoveOutcome::Blocked {
                target,
                by: occupant,
            },
            captured => MoveOutcome::Moved {
                to: target,
                captured,
            },
        }
    }

    /// Commit a plan made against the current board.
    ///
    /// Returns whether the token moved. Illegal plans change nothing.
    pub fn apply(&mut self, plan: &MovePlan) -> bool {
        let MoveOutcome::Moved { to, captured } = plan.outcome else {
            return false;
        };
        debug_assert_eq!(
            self.token(plan.token).position(),
            plan.from,
            "plan applied to a board it was not made on"
        );

        if let Some(victim) = captured {
            self.throw_out(victim, plan.token.seat);
        }
        let position = Position::at(to, self.config().total_track_fields());
        self.set_position(plan.token, position);

        match captured {
            Some(victim) => log::info!(
                "{} of {} moves to {} and throws out {} of {}",
                plan.token,
                self.contestant(plan.token.seat).name(),
                to,
                victim,
                self.contestant(victim.seat).name()
            ),
            None => log::info!(
                "{} of {} moves to {}",
                plan.token,
                self.contestant(plan.token.seat).name(),
                to
            ),
        }
        true
    }

    /// Send `occupant` home if a token of `mover` may throw it out.
    ///
    /// Returns false, changing nothing, for an own token.
    pub fn throw_out(&mut self, occupant: TokenId, mover: SeatId) -> bool {
        if !can_throw_out(occupant, mover) {
            return false;
        }
        self.set_position(occupant, Position::Home);
        true
    }

    /// Try to bring a home token out; commits only when `commit` is set.
    pub fn attempt_exit(&mut self, token: TokenId, roll: u32, commit: bool) -> MovePlan {
        let plan = self.plan_exit(token, roll);
        if commit {
            self.apply(&plan);
        }
        plan
    }

    /// Try to move a token forward; commits only when `commit` is set.
    pub fn advance(&mut self, token: TokenId, roll: u32, commit: bool) -> MovePlan {
        let plan = self.plan_advance(token, roll);
        if commit {
            self.apply(&plan);
        }
        plan
    }
}
