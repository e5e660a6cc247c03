//! Decisions the turn engine delegates to a player.
//!
//! The engine asks only when the rules leave a real choice:
//!
//! - `exit_or_move`: a home token can come out *and* a field token can
//!   move with the same roll
//! - `pick_token`: more than one field token can move
//!
//! Implementations must answer with one of the offered values. There is
//! no way to decline.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::Match;
use crate::core::TokenId;

/// Answer to the exit-or-move question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitOrMove {
    /// Bring a home token onto the track.
    ExitHome,
    /// Move one of the field tokens.
    MoveToken,
}

/// A field token that can legally move with the current roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub token: TokenId,
    /// Current relative index.
    pub from: usize,
    /// Fields left before the finish entry; `None` once inside the finish.
    pub fields_to_finish: Option<usize>,
    /// Opposing token the move would throw out.
    pub captures: Option<TokenId>,
}

/// A source of player decisions.
pub trait Chooser {
    /// Decide between bringing a token out and moving one of `candidates`.
    fn exit_or_move(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> ExitOrMove;

    /// Pick one of `candidates` (at least two) to move.
    fn pick_token(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> TokenId;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn exit_or_move(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> ExitOrMove {
        (**self).exit_or_move(game, roll, candidates)
    }

    fn pick_token(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> TokenId {
        (**self).pick_token(game, roll, candidates)
    }
}

impl<C: Chooser + ?Sized> Chooser for Box<C> {
    fn exit_or_move(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> ExitOrMove {
        (**self).exit_or_move(game, roll, candidates)
    }

    fn pick_token(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> TokenId {
        (**self).pick_token(game, roll, candidates)
    }
}

/// Always moves a field token, and always the first candidate offered
/// (the one furthest along).
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOptionChooser;

impl Chooser for FirstOptionChooser {
    fn exit_or_move(&mut self, _game: &Match, _roll: u32, _candidates: &[Candidate]) -> ExitOrMove {
        ExitOrMove::MoveToken
    }

    fn pick_token(&mut self, _game: &Match, _roll: u32, candidates: &[Candidate]) -> TokenId {
        candidates[0].token
    }
}

/// Answers from prepared queues, falling back to the first option once a
/// queue runs dry. Records every question it was asked.
#[derive(Clone, Debug, Default)]
pub struct ScriptedChooser {
    exits: VecDeque<ExitOrMove>,
    picks: VecDeque<TokenId>,
    /// Candidate lists seen by `exit_or_move`, in order.
    pub exit_questions: Vec<Vec<Candidate>>,
    /// Candidate lists seen by `pick_token`, in order.
    pub pick_questions: Vec<Vec<Candidate>>,
}

impl ScriptedChooser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer to the next exit-or-move question.
    #[must_use]
    pub fn then_exit_or_move(mut self, answer: ExitOrMove) -> Self {
        self.exits.push_back(answer);
        self
    }

    /// Queue an answer to the next pick question.
    #[must_use]
    pub fn then_pick(mut self, token: TokenId) -> Self {
        self.picks.push_back(token);
        self
    }
}

impl Chooser for ScriptedChooser {
    fn exit_or_move(&mut self, _game: &Match, _roll: u32, candidates: &[Candidate]) -> ExitOrMove {
        self.exit_questions.push(candidates.to_vec());
        self.exits.pop_front().unwrap_or(ExitOrMove::MoveToken)
    }

    fn pick_token(&mut self, _game: &Match, _roll: u32, candidates: &[Candidate]) -> TokenId {
        self.pick_questions.push(candidates.to_vec());
        self.picks.pop_front().unwrap_or(candidates[0].token)
    }
}
