//! Turn sequencing and player decisions.
//!
//! `TurnEngine` plays a [`Match`](crate::board::Match) one turn at a time.
//! Where the rules leave a choice it asks a [`Chooser`], so the same
//! engine runs interactive play, scripted tests and automated matches.
//!
//! ## Example
//!
//! ```
//! use rust_ludo::board::Match;
//! use rust_ludo::core::MatchConfig;
//! use rust_ludo::turn::{FirstOptionChooser, TurnEngine};
//!
//! let mut game = Match::new(MatchConfig::new(["Ann", "Bob", "Cid"]).with_seed(7));
//! let mut engine = TurnEngine::new(&game, FirstOptionChooser);
//!
//! let standings = engine.run(&mut game);
//! let mut ranks: Vec<_> = game.contestants().iter().map(|c| standings.rank(c.seat())).collect();
//! ranks.sort();
//! assert_eq!(ranks, vec![1, 2, 3]);
//! ```

mod chooser;
mod engine;
mod event;

pub use chooser::{Candidate, Chooser, ExitOrMove, FirstOptionChooser, ScriptedChooser};
pub use engine::{field_candidates, Candidates, RollResolution, TurnEngine, TurnReport};
pub use event::{Phase, Standings, TurnEvent};
