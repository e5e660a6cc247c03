//! Plain-text board view.
//!
//! One row per board quarter. A row shows the home tokens of the seat
//! starting there, the quarter's track fields, and the finish stretch of
//! the following seat (whose entry lies at the end of the quarter).
//! Tokens on track and in finish are drawn as seat number plus letter,
//! so `1C` is token C of seat 1.
//!
//! ```text
//! Ann   __CD | 0A__________________ | ________
//! Bob   ABCD | ____________________ | ________
//!            | ____________________ |
//!            | ____________________ | ________
//! ```

use std::fmt;

use crate::core::{SeatId, TokenId};

use super::game::Match;
use super::token::Position;

const EMPTY_CELL: &str = "__";

/// Borrowing view that renders a match as text.
pub struct BoardView<'a> {
    game: &'a Match,
}

impl<'a> BoardView<'a> {
    pub fn new(game: &'a Match) -> Self {
        Self { game }
    }

    fn name_width(&self) -> usize {
        self.game
            .contestants()
            .iter()
            .map(|c| c.name().chars().count())
            .max()
            .unwrap_or(0)
    }
}

fn cell(id: TokenId) -> String {
    format!("{}{}", id.seat.0, id.letter())
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.game.config();
        let board_size = config.board_size();
        let tokens = config.tokens_per_contestant;
        let fields = config.fields_per_contestant;
        let track = config.total_track_fields();
        let width = self.name_width();
        let occupancy = self.game.occupancy();
        let seats = self.game.contestants().len();

        for quarter in 0..board_size {
            match (quarter < seats).then(|| self.game.contestant(SeatId::new(quarter as u8))) {
                Some(contestant) => {
                    let out = contestant.tokens().iter().filter(|t| !t.is_home()).count();
                    let home: String = contestant.tokens_at_home().map(|t| t.letter()).collect();
                    write!(f, "{:<width$} {}{}", contestant.name(), "_".repeat(out), home)?;
                }
                None => write!(f, "{:<width$} {}", "", " ".repeat(tokens))?,
            }

            write!(f, " | ")?;
            for field in quarter * fields..(quarter + 1) * fields {
                match occupancy.get(&field) {
                    Some(&id) => write!(f, "{}", cell(id))?,
                    None => write!(f, "{EMPTY_CELL}")?,
                }
            }
            write!(f, " |")?;

            let next = (quarter + 1) % board_size;
            if next < seats {
                write!(f, " ")?;
                let finisher = self.game.contestant(SeatId::new(next as u8));
                for slot in 0..tokens {
                    let here = finisher
                        .tokens()
                        .iter()
                        .find(|t| t.position() == Position::Finished(track + slot));
                    match here {
                        Some(t) => write!(f, "{}", cell(t.id()))?,
                        None => write!(f, "{EMPTY_CELL}")?,
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    #[test]
    fn test_empty_board() {
        let game = Match::new(MatchConfig::new(["Ann", "Bob"]).with_fields_per_contestant(3).with_tokens_per_contestant(2));
        let text = BoardView::new(&game).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Ann AB | ______ | ____");
        assert_eq!(lines[1], "Bob AB | ______ |");
        assert_eq!(lines[2], "       | ______ |");
        assert_eq!(lines[3], "       | ______ | ____");
    }

    #[test]
    fn test_tokens_drawn_in_place() {
        let mut game = Match::new(MatchConfig::new(["Ann", "Bob"]).with_fields_per_contestant(3).with_tokens_per_contestant(2));
        game.place(TokenId::new(SeatId::new(0), 2), Position::OnTrack(1));
        game.place(TokenId::new(SeatId::new(1), 1), Position::Finished(13));

        let text = BoardView::new(&game).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Ann _A | __0B__ | __1A");
        assert_eq!(lines[1], "Bob _B | ______ |");
    }
}
