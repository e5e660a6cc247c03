//! Match configuration.
//!
//! `MatchConfig` holds the immutable rule parameters of a match. Every
//! derived quantity (board size, track length, exit roll, ...) is a
//! method recomputed on each call rather than a stored field.
//!
//! ## Precondition
//!
//! The highest dice face must be smaller than `fields_per_contestant`.
//! The engine assumes this and does not check it; callers that accept
//! configuration from outside should run [`MatchConfig::validate`].

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::ids::SeatId;

/// The board always has room for at least this many seats.
pub const MIN_BOARD_SIZE: usize = 4;

/// Rule parameters for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Contestant names in seat order. Names are unique.
    pub names: Vec<String>,

    /// Track fields per seat (one board quarter for up to four seats).
    pub fields_per_contestant: usize,

    /// Tokens each contestant races.
    pub tokens_per_contestant: usize,

    /// Faces of the die, ascending and distinct.
    pub dice_faces: Vec<u32>,

    /// How many rolls a contestant with every token at home gets to
    /// bring one out before the movement phase.
    pub exit_attempts: usize,

    /// Seed of the match's random source.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            names: vec!["Alice".to_string(), "Bob".to_string()],
            fields_per_contestant: 10,
            tokens_per_contestant: 4,
            dice_faces: (1..=6).collect(),
            exit_attempts: 3,
            seed: 1,
        }
    }
}

impl MatchConfig {
    /// Create a configuration for the given contestants with default rules.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the number of track fields per seat.
    #[must_use]
    pub fn with_fields_per_contestant(mut self, fields: usize) -> Self {
        self.fields_per_contestant = fields;
        self
    }

    /// Set the number of tokens per contestant.
    #[must_use]
    pub fn with_tokens_per_contestant(mut self, tokens: usize) -> Self {
        self.tokens_per_contestant = tokens;
        self
    }

    /// Set the dice faces. Faces are sorted and deduplicated.
    #[must_use]
    pub fn with_dice_faces(mut self, faces: impl IntoIterator<Item = u32>) -> Self {
        let mut faces: Vec<u32> = faces.into_iter().collect();
        faces.sort_unstable();
        faces.dedup();
        self.dice_faces = faces;
        self
    }

    /// Set the number of home exit attempts.
    #[must_use]
    pub fn with_exit_attempts(mut self, attempts: usize) -> Self {
        self.exit_attempts = attempts;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    // === Derived quantities ===

    /// Number of contestants.
    #[must_use]
    pub fn contestant_count(&self) -> usize {
        self.names.len()
    }

    /// Number of seats on the board: at least [`MIN_BOARD_SIZE`].
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.contestant_count().max(MIN_BOARD_SIZE)
    }

    /// Length of the shared ring.
    #[must_use]
    pub fn total_track_fields(&self) -> usize {
        self.board_size() * self.fields_per_contestant
    }

    /// Ring length plus the private finish stretch.
    #[must_use]
    pub fn total_fields_with_finish(&self) -> usize {
        self.total_track_fields() + self.tokens_per_contestant
    }

    /// Lowest roll that brings a token out of home.
    #[must_use]
    pub fn min_exit_roll(&self) -> u32 {
        self.max_dice_face()
    }

    /// Roll that grants another roll in the same turn.
    #[must_use]
    pub fn extra_roll_threshold(&self) -> u32 {
        self.max_dice_face()
    }

    /// Relative index of the last finish slot.
    #[must_use]
    pub fn last_finish_index(&self) -> usize {
        self.total_fields_with_finish() - 1
    }

    /// Board offset of a seat on the shared ring.
    #[must_use]
    pub fn seat_offset(&self, seat: SeatId) -> usize {
        seat.index() * self.fields_per_contestant
    }

    /// Absolute ring index of a seat's relative track position.
    #[must_use]
    pub fn absolute_field(&self, seat: SeatId, relative: usize) -> usize {
        (relative + self.seat_offset(seat)) % self.total_track_fields()
    }

    fn max_dice_face(&self) -> u32 {
        self.dice_faces.iter().copied().max().unwrap_or(0)
    }

    // === Validation ===

    /// Check the preconditions the engine assumes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.contestant_count();
        if count < 2 {
            return Err(ConfigError::TooFewContestants(count));
        }
        if count > 255 {
            return Err(ConfigError::TooManyContestants(count));
        }
        for (i, name) in self.names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if self.names[..i].contains(name) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
        }
        if self.fields_per_contestant == 0 {
            return Err(ConfigError::NoFields);
        }
        if !(1..=26).contains(&self.tokens_per_contestant) {
            return Err(ConfigError::TokenCount(self.tokens_per_contestant));
        }
        if self.dice_faces.contains(&0) {
            return Err(ConfigError::ZeroDiceFace);
        }
        let mut sorted = self.dice_faces.clone();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
            return Err(ConfigError::DuplicateDiceFace(pair[0]));
        }
        if sorted.len() < 2 {
            return Err(ConfigError::TooFewDiceFaces);
        }
        let face = self.max_dice_face();
        if face as usize >= self.fields_per_contestant {
            return Err(ConfigError::DiceFaceTooLarge {
                face,
                fields: self.fields_per_contestant,
            });
        }
        if self.exit_attempts == 0 {
            return Err(ConfigError::NoExitAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();

        assert_eq!(config.names, vec!["Alice", "Bob"]);
        assert_eq!(config.fields_per_contestant, 10);
        assert_eq!(config.tokens_per_contestant, 4);
        assert_eq!(config.dice_faces, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(config.exit_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_two_players() {
        let config = MatchConfig::new(["A", "B"]);

        assert_eq!(config.contestant_count(), 2);
        assert_eq!(config.board_size(), 4);
        assert_eq!(config.total_track_fields(), 40);
        assert_eq!(config.total_fields_with_finish(), 44);
        assert_eq!(config.last_finish_index(), 43);
        assert_eq!(config.min_exit_roll(), 6);
        assert_eq!(config.extra_roll_threshold(), 6);
    }

    #[test]
    fn test_derived_six_players() {
        let config = MatchConfig::new(["A", "B", "C", "D", "E", "F"]).with_fields_per_contestant(8);

        assert_eq!(config.board_size(), 6);
        assert_eq!(config.total_track_fields(), 48);
        assert_eq!(config.seat_offset(SeatId::new(5)), 40);
        assert_eq!(config.absolute_field(SeatId::new(5), 10), 2);
    }

    #[test]
    fn test_derived_quantities_follow_fields() {
        let mut config = MatchConfig::new(["A", "B", "C"]);
        assert_eq!(config.total_track_fields(), 40);

        config.fields_per_contestant = 12;
        assert_eq!(config.total_track_fields(), 48);
        assert_eq!(config.total_fields_with_finish(), 52);
    }

    #[test]
    fn test_dice_faces_normalised() {
        let config = MatchConfig::default().with_dice_faces([4, 2, 4, 1]);
        assert_eq!(config.dice_faces, vec![1, 2, 4]);
        assert_eq!(config.min_exit_roll(), 4);
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            MatchConfig::new(["Solo"]).validate(),
            Err(ConfigError::TooFewContestants(1))
        );
        assert_eq!(
            MatchConfig::new(["A", "A"]).validate(),
            Err(ConfigError::DuplicateName("A".to_string()))
        );
        assert_eq!(MatchConfig::new(["A", " "]).validate(), Err(ConfigError::EmptyName));
        assert_eq!(
            MatchConfig::default().with_fields_per_contestant(0).validate(),
            Err(ConfigError::NoFields)
        );
        assert_eq!(
            MatchConfig::default().with_tokens_per_contestant(27).validate(),
            Err(ConfigError::TokenCount(27))
        );
        assert_eq!(
            MatchConfig::default().with_dice_faces([6]).validate(),
            Err(ConfigError::TooFewDiceFaces)
        );
        assert_eq!(
            MatchConfig::default().with_dice_faces([0, 1]).validate(),
            Err(ConfigError::ZeroDiceFace)
        );
        assert_eq!(
            MatchConfig {
                dice_faces: vec![1, 1, 1, 1, 2, 3, 4, 5, 6],
                ..MatchConfig::default()
            }
            .validate(),
            Err(ConfigError::DuplicateDiceFace(1))
        );
        assert_eq!(
            MatchConfig::default().with_dice_faces(1..=10).validate(),
            Err(ConfigError::DiceFaceTooLarge { face: 10, fields: 10 })
        );
        assert_eq!(
            MatchConfig::default().with_exit_attempts(0).validate(),
            Err(ConfigError::NoExitAttempts)
        );
    }

    #[test]
    fn test_duplicate_faces_from_serde_rejected() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"dice_faces": [6, 6, 6, 1, 2]}"#).unwrap();

        assert_eq!(config.validate(), Err(ConfigError::DuplicateDiceFace(6)));
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: MatchConfig =
            serde_json::from_str(r#"{"names": ["Ann", "Ben", "Cid"], "seed": 9}"#).unwrap();

        assert_eq!(config.contestant_count(), 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.fields_per_contestant, 10);
        assert_eq!(config.dice_faces, vec![1, 2, 3, 4, 5, 6]);
    }
}
