//! Configuration errors.
//!
//! The rules themselves have no failure modes; the only thing that can
//! be wrong is a configuration handed in by the caller.

use thiserror::Error;

/// A configuration that breaks one of the match preconditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least 2 contestants are required, got {0}")]
    TooFewContestants(usize),
    #[error("at most 255 contestants are supported, got {0}")]
    TooManyContestants(usize),
    #[error("contestant names must not be empty")]
    EmptyName,
    #[error("contestant name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("fields per contestant must be positive")]
    NoFields,
    #[error("tokens per contestant must be between 1 and 26, got {0}")]
    TokenCount(usize),
    #[error("at least two distinct dice faces are required")]
    TooFewDiceFaces,
    #[error("dice face {0} is listed more than once")]
    DuplicateDiceFace(u32),
    #[error("dice faces must be positive")]
    ZeroDiceFace,
    #[error("highest dice face {face} must be smaller than fields per contestant ({fields})")]
    DiceFaceTooLarge { face: u32, fields: usize },
    #[error("exit attempts must be positive")]
    NoExitAttempts,
}
