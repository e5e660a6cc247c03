//! Board state: tokens, contestants, the match and the movement rules.
//!
//! The shared ring has `board_size * fields_per_contestant` fields, where
//! the board size is the number of contestants but at least four. Each
//! contestant enters the ring at its seat offset and, after a full lap,
//! continues into a private finish stretch with one slot per token.

mod token;
mod contestant;
mod game;
mod movement;
mod view;

pub use token::{Position, Token};
pub use contestant::{Contestant, ContestantState};
pub use game::Match;
pub use movement::{can_throw_out, MoveKind, MoveOutcome, MovePlan};
pub use view::BoardView;
