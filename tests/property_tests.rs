//! Property tests for the board invariants.
//!
//! Matches are played with random seeds and contestant counts; after
//! every turn the board must still be consistent.

use std::collections::HashSet;

use proptest::prelude::*;

use rust_ludo::board::{Match, Position};
use rust_ludo::core::{MatchConfig, SeatId, TokenId};
use rust_ludo::turn::{FirstOptionChooser, TurnEngine};

const NAMES: [&str; 6] = ["Ann", "Bob", "Cid", "Dan", "Eve", "Fay"];

fn config(players: usize, seed: u64) -> MatchConfig {
    MatchConfig::new(NAMES[..players].iter().copied()).with_seed(seed)
}

/// Every token is in a valid state and no two tokens of one owner share
/// a field or a finish slot.
fn assert_board_consistent(game: &Match) {
    let config = game.config();
    let mut track = HashSet::new();
    let mut finish = HashSet::new();

    for token in game.tokens() {
        match token.position() {
            Position::Home => assert_eq!(game.absolute_index(token.id()), None),
            Position::OnTrack(r) => {
                assert!(r < config.total_track_fields());
                let field = game.absolute_index(token.id()).unwrap();
                assert!(track.insert((token.owner(), field)), "{:?} stacked on {}", token.id(), field);
            }
            Position::Finished(r) => {
                assert!(r >= config.total_track_fields() && r < config.total_fields_with_finish());
                assert_eq!(game.absolute_index(token.id()), None);
                assert!(finish.insert((token.owner(), r)));
            }
        }
    }
}

/// Stage a random board: no two tokens share a ring field, and no owner
/// has two tokens in one finish slot.
fn staged(players: usize, seed: u64, slots: &[Option<usize>]) -> Match {
    let mut game = Match::new(config(players, seed));
    let total = game.config().total_fields_with_finish();
    let track = game.config().total_track_fields();
    let tokens = game.config().tokens_per_contestant;
    let mut ring = HashSet::new();

    for seat in SeatId::all(players) {
        let mut finish = HashSet::new();
        for ordinal in 1..=tokens as u8 {
            let pick = slots[(seat.index() * tokens + ordinal as usize - 1) % slots.len()];
            let Some(r) = pick.map(|r| r % total) else {
                continue;
            };
            let free = if r < track {
                ring.insert(game.config().absolute_field(seat, r))
            } else {
                finish.insert(r)
            };
            if free {
                game.place(TokenId::new(seat, ordinal), Position::at(r, track));
            }
        }
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_full_match_keeps_invariants(players in 2usize..=6, seed in any::<u64>()) {
        let mut game = Match::new(config(players, seed));
        let mut engine = TurnEngine::new(&game, FirstOptionChooser);

        let mut turns = 0;
        while engine.play_turn(&mut game).is_some() {
            assert_board_consistent(&game);
            turns += 1;
            prop_assert!(turns < 50_000, "match did not end");
        }

        let standings = engine.standings().unwrap();
        let mut ranks: Vec<u8> = SeatId::all(players).map(|s| standings.rank(s)).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=players as u8).collect::<Vec<_>>());
        prop_assert_eq!(game.advance_turn(), None);
    }

    #[test]
    fn prop_seeded_matches_replay(players in 2usize..=4, seed in any::<u64>()) {
        let play = || {
            let mut game = Match::new(config(players, seed));
            let mut engine = TurnEngine::new(&game, FirstOptionChooser);
            engine.run(&mut game);
            (engine.history().clone(), game.tokens().cloned().collect::<Vec<_>>())
        };

        prop_assert_eq!(play(), play());
    }

    #[test]
    fn prop_simulation_is_pure(
        players in 2usize..=6,
        slots in prop::collection::vec(prop::option::of(0usize..80), 1..36),
        roll in 1u32..=6,
    ) {
        let mut game = staged(players, 1, &slots);
        let before: Vec<_> = game.tokens().cloned().collect();
        let ids: Vec<_> = game.tokens().map(|t| t.id()).collect();

        for id in ids {
            game.advance(id, roll, false);
            game.attempt_exit(id, roll, false);
        }

        let after: Vec<_> = game.tokens().cloned().collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_committed_moves_keep_owners_apart(
        players in 2usize..=6,
        slots in prop::collection::vec(prop::option::of(0usize..80), 1..36),
        roll in 1u32..=6,
        pick in any::<prop::sample::Index>(),
    ) {
        let mut game = staged(players, 2, &slots);
        assert_board_consistent(&game);
        let ids: Vec<_> = game.tokens().map(|t| t.id()).collect();
        let id = ids[pick.index(ids.len())];

        let before = game.token(id).position();
        let plan = if before.is_home() {
            game.attempt_exit(id, roll, true)
        } else {
            game.advance(id, roll, true)
        };

        assert_board_consistent(&game);
        if !plan.moved() {
            prop_assert_eq!(game.token(id).position(), before);
        }
        if let Some(victim) = plan.captured() {
            prop_assert_ne!(victim.seat, id.seat);
            prop_assert!(game.token(victim).is_home());
        }
    }

    #[test]
    fn prop_overshoot_never_moves(
        from in 0usize..44,
        roll in 1u32..=6,
    ) {
        let mut game = Match::new(config(2, 3));
        let id = TokenId::new(SeatId::new(0), 1);
        game.place(id, Position::at(from, 40));

        let plan = game.advance(id, roll, true);
        if from + roll as usize >= 44 {
            prop_assert!(!plan.moved());
            prop_assert_eq!(game.token(id).position(), Position::at(from, 40));
        } else {
            prop_assert!(plan.moved());
        }
    }
}
