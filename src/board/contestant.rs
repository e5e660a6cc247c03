//! Contestants and their aggregate state.

use serde::{Deserialize, Serialize};

use crate::core::{MatchConfig, SeatId, TokenId};

use super::token::Token;

/// Aggregate state of a contestant, derived from its tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestantState {
    /// No token on the track and not every token finished.
    Home,
    /// At least one token on the track.
    OnFields,
    /// Every token is in the finish stretch.
    Finished,
}

/// A player seated at the board, owning a fixed set of tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contestant {
    seat: SeatId,
    name: String,
    tokens: Vec<Token>,
}

impl Contestant {
    /// Create a contestant with `token_count` tokens, all at home.
    pub fn new(seat: SeatId, name: impl Into<String>, token_count: usize) -> Self {
        let tokens = (1..=token_count as u8)
            .map(|ordinal| Token::new(TokenId::new(seat, ordinal)))
            .collect();

        Self {
            seat,
            name: name.into(),
            tokens,
        }
    }

    #[must_use]
    pub fn seat(&self) -> SeatId {
        self.seat
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All owned tokens in ordinal order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Look up an owned token.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        debug_assert_eq!(id.seat, self.seat);
        self.tokens.get(id.slot())
    }

    pub(crate) fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(id.slot())
    }

    /// Aggregate state. Computed on every call.
    #[must_use]
    pub fn state(&self) -> ContestantState {
        if self.tokens.iter().all(Token::is_finished) {
            ContestantState::Finished
        } else if self.tokens.iter().any(Token::is_on_track) {
            ContestantState::OnFields
        } else {
            ContestantState::Home
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state() == ContestantState::Finished
    }

    /// Tokens that may still be asked to advance: out of home and not
    /// already in the last finish slot.
    pub fn moveable_tokens<'a>(&'a self, config: &MatchConfig) -> impl Iterator<Item = &'a Token> + 'a {
        let last = config.last_finish_index();
        self.tokens
            .iter()
            .filter(move |t| matches!(t.relative_index(), Some(r) if r != last))
    }

    /// Tokens still at home.
    pub fn tokens_at_home(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_home())
    }
}
