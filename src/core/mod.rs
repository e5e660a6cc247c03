//! Core types: seat and token ids, RNG, configuration, errors.
//!
//! These are the leaf building blocks the board and the turn engine are
//! assembled from. Nothing in here knows about token positions.

pub mod ids;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{SeatId, SeatMap, TokenId};
pub use rng::{GameRng, GameRngState};
pub use config::{MatchConfig, MIN_BOARD_SIZE};
pub use error::ConfigError;
