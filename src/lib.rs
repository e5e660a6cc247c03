//! # rust-ludo
//!
//! A rules engine for cross-and-circle race board games: 2 or more
//! contestants race their tokens once around a shared ring and into a
//! private finish stretch, throwing out opposing tokens they land on.
//!
//! ## Design Principles
//!
//! 1. **Derived, not stored**: board size, track length and contestant
//!    state are computed from the configuration and token positions on
//!    every call.
//!
//! 2. **Simulate before commit**: every move is evaluated into a
//!    `MovePlan` without touching the board; exactly one plan per roll
//!    is committed.
//!
//! 3. **Injected decisions and randomness**: player choices come through
//!    the `Chooser` trait and every die is rolled from the match's single
//!    seeded RNG, so a seed plus a deterministic chooser replays a match.
//!
//! ## Modules
//!
//! - `core`: Seat and token ids, RNG, configuration, errors
//! - `board`: Tokens, contestants, the match, movement rules, text view
//! - `turn`: Turn engine, chooser trait, event history, standings

pub mod core;
pub mod board;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, GameRngState, MatchConfig, SeatId, SeatMap, TokenId};

pub use crate::board::{
    BoardView, Contestant, ContestantState, Match, MoveKind, MoveOutcome, MovePlan, Position, Token,
};

pub use crate::turn::{
    Candidate, Chooser, ExitOrMove, FirstOptionChooser, ScriptedChooser, Standings, TurnEngine,
    TurnEvent, TurnReport,
};
