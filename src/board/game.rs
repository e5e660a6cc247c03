//! The match: seats, board topology, turn pointer and dice.

use rustc_hash::FxHashMap;

use crate::core::{GameRng, MatchConfig, SeatId, TokenId};

use super::contestant::{Contestant, ContestantState};
use super::token::{Position, Token};

/// A match in progress.
///
/// Owns the contestants in seat order, the configuration, the turn
/// pointer and the single random source every roll is drawn from.
#[derive(Clone, Debug)]
pub struct Match {
    config: MatchConfig,
    contestants: Vec<Contestant>,
    current: SeatId,
    rng: GameRng,
}

impl Match {
    /// Seat the configured contestants and draw the starting seat.
    ///
    /// The configuration is trusted; see [`MatchConfig::validate`].
    pub fn new(config: MatchConfig) -> Self {
        let contestants: Vec<Contestant> = config
            .names
            .iter()
            .zip(SeatId::all(config.contestant_count()))
            .map(|(name, seat)| Contestant::new(seat, name.as_str(), config.tokens_per_contestant))
            .collect();

        let mut rng = GameRng::new(config.seed);
        let current = SeatId::new(rng.gen_range_usize(0..contestants.len()) as u8);

        log::debug!(
            "match with {} contestants on a {}-field ring, {} starts",
            contestants.len(),
            config.total_track_fields(),
            contestants[current.index()].name()
        );

        Self {
            config,
            contestants,
            current,
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Contestants in seat order.
    #[must_use]
    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    #[must_use]
    pub fn contestant(&self, seat: SeatId) -> &Contestant {
        &self.contestants[seat.index()]
    }

    #[must_use]
    pub fn current_seat(&self) -> SeatId {
        self.current
    }

    /// Contestant at the turn pointer.
    #[must_use]
    pub fn current_contestant(&self) -> &Contestant {
        self.contestant(self.current)
    }

    /// Look up a token anywhere on the board.
    ///
    /// Panics if the id does not belong to this match.
    #[must_use]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.contestant(id.seat).tokens()[id.slot()]
    }

    /// All tokens, seat by seat.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.contestants.iter().flat_map(|c| c.tokens().iter())
    }

    /// Place a token directly, bypassing the movement rules.
    ///
    /// Used to stage board situations in tests and benches. Panics if
    /// another token of the same owner already stands on `position`.
    #[doc(hidden)]
    pub fn place(&mut self, id: TokenId, position: Position) {
        assert!(
            position.is_home()
                || !self
                    .contestant(id.seat)
                    .tokens()
                    .iter()
                    .any(|t| t.id() != id && t.position() == position),
            "{} cannot share {:?} with another token of {}",
            id,
            position,
            id.seat
        );
        self.set_position(id, position);
    }

    pub(crate) fn set_position(&mut self, id: TokenId, position: Position) {
        if let Some(token) = self.contestants[id.seat.index()].token_mut(id) {
            token.set_position(position);
        }
    }

    /// Absolute ring index of a token; `None` unless it is on the track.
    #[must_use]
    pub fn absolute_index(&self, id: TokenId) -> Option<usize> {
        match self.token(id).position() {
            Position::OnTrack(r) => Some(self.config.absolute_field(id.seat, r)),
            _ => None,
        }
    }

    /// Roll the die: one configured face, uniformly at random.
    pub fn roll_dice(&mut self) -> u32 {
        let roll = self.rng.choose(&self.config.dice_faces).copied().unwrap_or(0);
        log::debug!("{} rolled {}", self.current_contestant().name(), roll);
        roll
    }

    /// Find the token standing where `asking` would land at `relative`.
    ///
    /// On the shared ring any owner's token at the same absolute field
    /// counts. In the finish stretch only the asker's own finished
    /// tokens can be there.
    #[must_use]
    pub fn find_occupant(&self, asking: SeatId, relative: usize) -> Option<TokenId> {
        if relative >= self.config.total_track_fields() {
            return self
                .contestant(asking)
                .tokens()
                .iter()
                .find(|t| t.position() == Position::Finished(relative))
                .map(Token::id);
        }

        let absolute = self.config.absolute_field(asking, relative);
        self.tokens()
            .map(Token::id)
            .find(|&id| self.absolute_index(id) == Some(absolute))
    }

    /// Absolute ring field to token, for every token on the track.
    #[must_use]
    pub fn occupancy(&self) -> FxHashMap<usize, TokenId> {
        self.tokens()
            .filter_map(|t| self.absolute_index(t.id()).map(|field| (field, t.id())))
            .collect()
    }

    /// Number of contestants whose every token has finished.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.contestants.iter().filter(|c| c.is_finished()).count()
    }

    /// True once fewer than two contestants are still racing.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.contestants.len() - self.finished_count() < 2
    }

    /// Move the turn pointer to the next seat that has not finished.
    ///
    /// Returns `None`, leaving the pointer untouched, once the match is over.
    pub fn advance_turn(&mut self) -> Option<SeatId> {
        if self.is_over() {
            return None;
        }

        let count = self.contestants.len();
        loop {
            self.current = SeatId::new(((self.current.index() + 1) % count) as u8);
            if self.current_contestant().state() != ContestantState::Finished {
                return Some(self.current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player() -> Match {
        Match::new(MatchConfig::new(["Ann", "Bob"]).with_seed(3))
    }

    fn token(seat: u8, ordinal: u8) -> TokenId {
        TokenId::new(SeatId::new(seat), ordinal)
    }

    #[test]
    fn test_new_match() {
        let game = two_player();

        assert_eq!(game.contestants().len(), 2);
        assert!(game.current_seat().index() < 2);
        assert!(game.tokens().all(Token::is_home));
        assert!(!game.is_over());
    }

    #[test]
    fn test_starting_seat_is_seeded() {
        for seed in 0..20 {
            let config = MatchConfig::new(["A", "B", "C", "D"]).with_seed(seed);
            assert_eq!(
                Match::new(config.clone()).current_seat(),
                Match::new(config).current_seat()
            );
        }
    }

    #[test]
    fn test_roll_dice_in_faces() {
        let mut game = Match::new(MatchConfig::default().with_dice_faces([2, 4, 6]));
        for _ in 0..100 {
            assert!([2, 4, 6].contains(&game.roll_dice()));
        }
    }

    #[test]
    fn test_absolute_index_uses_seat_offset() {
        let mut game = two_player();
        game.place(token(1, 1), Position::OnTrack(35));
        game.place(token(0, 1), Position::OnTrack(4));

        assert_eq!(game.absolute_index(token(0, 1)), Some(4));
        assert_eq!(game.absolute_index(token(1, 1)), Some(5));
        assert_eq!(game.absolute_index(token(0, 2)), None);

        game.place(token(0, 1), Position::Finished(40));
        assert_eq!(game.absolute_index(token(0, 1)), None);
    }

    #[test]
    fn test_find_occupant_on_ring() {
        let mut game = two_player();
        game.place(token(1, 2), Position::OnTrack(0));

        // Seat 1 starts at absolute 10, which is relative 10 for seat 0.
        assert_eq!(game.find_occupant(SeatId::new(0), 10), Some(token(1, 2)));
        assert_eq!(game.find_occupant(SeatId::new(1), 0), Some(token(1, 2)));
        assert_eq!(game.find_occupant(SeatId::new(0), 0), None);
    }

    #[test]
    fn test_find_occupant_in_finish_is_private() {
        let mut game = two_player();
        game.place(token(1, 1), Position::Finished(41));

        assert_eq!(game.find_occupant(SeatId::new(0), 41), None);
        assert_eq!(game.find_occupant(SeatId::new(1), 41), Some(token(1, 1)));
    }

    #[test]
    fn test_occupancy() {
        let mut game = two_player();
        game.place(token(0, 1), Position::OnTrack(2));
        game.place(token(1, 3), Position::OnTrack(2));
        game.place(token(1, 4), Position::Finished(42));

        let occupancy = game.occupancy();
        assert_eq!(occupancy.len(), 2);
        assert_eq!(occupancy[&2], token(0, 1));
        assert_eq!(occupancy[&12], token(1, 3));
    }

    #[test]
    #[should_panic(expected = "cannot share")]
    fn test_place_refuses_own_stack() {
        let mut game = two_player();
        game.place(token(0, 1), Position::OnTrack(7));
        game.place(token(0, 2), Position::OnTrack(7));
    }

    #[test]
    fn test_place_allows_opponent_on_field() {
        let mut game = two_player();
        game.place(token(0, 1), Position::OnTrack(7));
        game.place(token(0, 1), Position::OnTrack(8));
        game.place(token(1, 1), Position::OnTrack(38));

        assert_eq!(game.absolute_index(token(1, 1)), game.absolute_index(token(0, 1)));
    }

    #[test]
    fn test_advance_turn_skips_finished() {
        let mut game = Match::new(MatchConfig::new(["A", "B", "C"]).with_tokens_per_contestant(1));
        let start = game.current_seat();
        let skipped = SeatId::new(((start.index() + 1) % 3) as u8);
        game.place(TokenId::new(skipped, 1), Position::Finished(40));

        let next = game.advance_turn().unwrap();
        assert_eq!(next.index(), (start.index() + 2) % 3);
        assert_eq!(game.current_seat(), next);
    }

    #[test]
    fn test_advance_turn_signals_match_end() {
        let mut game = Match::new(MatchConfig::new(["A", "B"]).with_tokens_per_contestant(1));
        game.place(token(0, 1), Position::Finished(40));

        assert!(game.is_over());
        let before = game.current_seat();
        assert_eq!(game.advance_turn(), None);
        assert_eq!(game.advance_turn(), None);
        assert_eq!(game.current_seat(), before);
    }
}
