//! The per-turn decision procedure.
//!
//! A turn runs through up to three phases:
//!
//! 1. **Home exit**: only when every remaining token is at home. Roll up
//!    to `exit_attempts` times; the first roll that brings a token out
//!    ends the phase.
//! 2. **Movement**: while a token is out of home and can still move,
//!    roll, list the legal moves by simulating them, pick one (asking
//!    the chooser where the rules leave a choice) and commit it. Rolling
//!    the highest face rolls again.
//! 3. **Turn end**: record the rank of a contestant that just finished
//!    and pass the turn to the next contestant still racing.

use im::Vector;
use smallvec::SmallVec;

use crate::board::{ContestantState, Match, MovePlan, Token};
use crate::core::{SeatId, SeatMap, TokenId};

use super::chooser::{Candidate, Chooser, ExitOrMove};
use super::event::{Phase, Standings, TurnEvent};

/// Legal field moves for one roll, furthest token first.
pub type Candidates = SmallVec<[Candidate; 4]>;

/// What a single movement roll resulted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollResolution {
    /// A home token came out.
    Exited(MovePlan),
    /// A field token moved.
    Advanced(MovePlan),
    /// Nothing could move.
    NoMove,
}

/// Summary of one played turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub seat: SeatId,
    /// Every roll made, home exit attempts included.
    pub rolls: SmallVec<[u32; 4]>,
    /// Rank, if the contestant finished this turn.
    pub finished_rank: Option<u8>,
    /// Seat of the next turn; `None` once the match is over.
    pub next: Option<SeatId>,
}

/// Drives a match turn by turn.
pub struct TurnEngine<C: Chooser> {
    chooser: C,
    turn: u32,
    ranks: SeatMap<Option<u8>>,
    history: Vector<TurnEvent>,
    over: bool,
}

impl<C: Chooser> TurnEngine<C> {
    /// Create an engine for `game`, delegating choices to `chooser`.
    pub fn new(game: &Match, chooser: C) -> Self {
        Self {
            chooser,
            turn: 0,
            ranks: SeatMap::with_default(game.contestants().len()),
            history: Vector::new(),
            over: false,
        }
    }

    #[must_use]
    pub fn chooser(&self) -> &C {
        &self.chooser
    }

    pub fn into_chooser(self) -> C {
        self.chooser
    }

    /// Number of turns played so far.
    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turn
    }

    /// Everything that happened so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnEvent> {
        &self.history
    }

    /// Rank recorded for a seat, if it has one yet.
    #[must_use]
    pub fn rank(&self, seat: SeatId) -> Option<u8> {
        self.ranks[seat]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Final standings, once the match is over.
    #[must_use]
    pub fn standings(&self) -> Option<Standings> {
        self.over.then(|| self.final_standings())
    }

    fn final_standings(&self) -> Standings {
        Standings::new(SeatMap::new(self.ranks.len(), |seat| self.ranks[seat].unwrap_or(0)))
    }

    /// Play turns until the match is over.
    pub fn run(&mut self, game: &mut Match) -> Standings {
        while self.play_turn(game).is_some() {}
        self.final_standings()
    }

    /// Play the current contestant's turn. Returns `None` once the match is over.
    pub fn play_turn(&mut self, game: &mut Match) -> Option<TurnReport> {
        if self.over {
            return None;
        }
        if game.is_over() {
            self.finish_match(game);
            return None;
        }

        self.turn += 1;
        let seat = game.current_seat();
        self.record(TurnEvent::TurnStarted { turn: self.turn, seat });
        log::info!("turn {}: {} to play", self.turn, game.contestant(seat).name());

        let mut rolls = SmallVec::new();
        if game.contestant(seat).state() == ContestantState::Home {
            self.home_exit_phase(game, seat, &mut rolls);
        }
        self.movement_phase(game, seat, &mut rolls);

        let finished_rank = self.record_finish(game, seat);
        let next = game.advance_turn();
        if next.is_none() {
            self.finish_match(game);
        }

        Some(TurnReport {
            turn: self.turn,
            seat,
            rolls,
            finished_rank,
            next,
        })
    }

    fn home_exit_phase(&mut self, game: &mut Match, seat: SeatId, rolls: &mut SmallVec<[u32; 4]>) {
        let attempts = game.config().exit_attempts;
        for attempt in 1..=attempts {
            let roll = game.roll_dice();
            rolls.push(roll);
            self.record(TurnEvent::Rolled { seat, phase: Phase::HomeExit, roll });
            log::debug!("exit attempt {}/{}: rolled {}", attempt, attempts, roll);

            let Some(token) = first_home_token(game, seat) else {
                return;
            };
            let plan = game.attempt_exit(token, roll, true);
            if plan.moved() {
                self.record(TurnEvent::Exited { token, captured: plan.captured() });
                return;
            }
        }
    }

    fn movement_phase(&mut self, game: &mut Match, seat: SeatId, rolls: &mut SmallVec<[u32; 4]>) {
        let threshold = game.config().extra_roll_threshold();
        loop {
            // Home tokens only come out through the exit phase budget.
            if game.contestant(seat).moveable_tokens(game.config()).next().is_none() {
                log::debug!("{} has no token to move", game.contestant(seat).name());
                break;
            }

            let roll = game.roll_dice();
            rolls.push(roll);
            self.record(TurnEvent::Rolled { seat, phase: Phase::Movement, roll });

            self.resolve_roll(game, roll);

            if roll != threshold {
                break;
            }
            log::debug!("rolled {}, rolling again", roll);
        }
    }

    /// Decide and commit the move for one movement roll of the current
    /// contestant.
    pub fn resolve_roll(&mut self, game: &mut Match, roll: u32) -> RollResolution {
        let seat = game.current_seat();
        let candidates = field_candidates(game, seat, roll);
        let exit = first_home_token(game, seat)
            .map(|token| game.plan_exit(token, roll))
            .filter(MovePlan::moved);
        log::debug!(
            "roll {}: {} field move(s), exit {}",
            roll,
            candidates.len(),
            if exit.is_some() { "possible" } else { "not possible" }
        );

        match (exit, candidates.is_empty()) {
            (Some(plan), false) => match self.chooser.exit_or_move(game, roll, &candidates) {
                ExitOrMove::ExitHome => self.commit_exit(game, plan),
                ExitOrMove::MoveToken => self.move_field_token(game, roll, &candidates),
            },
            (Some(plan), true) => self.commit_exit(game, plan),
            (None, false) => self.move_field_token(game, roll, &candidates),
            (None, true) => {
                log::debug!("{} cannot move with {}", game.contestant(seat).name(), roll);
                self.record(TurnEvent::NoMove { seat, roll });
                RollResolution::NoMove
            }
        }
    }

    fn commit_exit(&mut self, game: &mut Match, plan: MovePlan) -> RollResolution {
        game.apply(&plan);
        self.record(TurnEvent::Exited {
            token: plan.token,
            captured: plan.captured(),
        });
        RollResolution::Exited(plan)
    }

    fn move_field_token(&mut self, game: &mut Match, roll: u32, candidates: &[Candidate]) -> RollResolution {
        let token = if candidates.len() == 1 {
            candidates[0].token
        } else {
            self.pick(game, roll, candidates)
        };

        let plan = game.advance(token, roll, true);
        if let (Some(from), Some(to)) = (plan.from.relative_index(), plan.target()) {
            self.record(TurnEvent::Advanced {
                token,
                from,
                to,
                captured: plan.captured(),
            });
        }
        RollResolution::Advanced(plan)
    }

    fn pick(&mut self, game: &Match, roll: u32, candidates: &[Candidate]) -> TokenId {
        loop {
            let choice = self.chooser.pick_token(game, roll, candidates);
            if candidates.iter().any(|c| c.token == choice) {
                return choice;
            }
            log::warn!("token {} of {} was not offered, asking again", choice, choice.seat);
        }
    }

    fn record_finish(&mut self, game: &Match, seat: SeatId) -> Option<u8> {
        if self.ranks[seat].is_some() || !game.contestant(seat).is_finished() {
            return None;
        }

        let already = game
            .contestants()
            .iter()
            .filter(|c| c.seat() != seat && c.is_finished())
            .count();
        let rank = (already + 1) as u8;
        self.ranks[seat] = Some(rank);
        self.record(TurnEvent::Finished { seat, rank });
        log::info!("{} finished as number {}", game.contestant(seat).name(), rank);
        Some(rank)
    }

    fn finish_match(&mut self, game: &Match) {
        let mut next_rank = self.ranks.values().flatten().count() as u8 + 1;
        // Contestants that finished without us seeing it rank ahead of the rest.
        let mut unranked: Vec<_> = game
            .contestants()
            .iter()
            .filter(|c| self.ranks[c.seat()].is_none())
            .collect();
        unranked.sort_by_key(|c| !c.is_finished());
        for contestant in unranked {
            self.ranks[contestant.seat()] = Some(next_rank);
            next_rank += 1;
        }

        self.over = true;
        self.record(TurnEvent::MatchOver);
        log::info!("match over after {} turns", self.turn);
    }

    fn record(&mut self, event: TurnEvent) {
        self.history.push_back(event);
    }
}

/// Legal field moves of a contestant for `roll`, found by simulating
/// each moveable token. Ordered by current position, furthest first.
#[must_use]
pub fn field_candidates(game: &Match, seat: SeatId, roll: u32) -> Candidates {
    let track = game.config().total_track_fields();
    let mut candidates: Candidates = game
        .contestant(seat)
        .moveable_tokens(game.config())
        .map(|t| game.plan_advance(t.id(), roll))
        .filter(MovePlan::moved)
        .filter_map(|plan| {
            let from = plan.from.relative_index()?;
            Some(Candidate {
                token: plan.token,
                from,
                fields_to_finish: (from < track).then(|| track - from),
                captures: plan.captured(),
            })
        })
        .collect();
    candidates.sort_by(|a, b| b.from.cmp(&a.from));
    candidates
}

fn first_home_token(game: &Match, seat: SeatId) -> Option<TokenId> {
    game.contestant(seat).tokens_at_home().next().map(Token::id)
}
