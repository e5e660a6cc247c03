//! Seat and token identification plus per-seat data storage.
//!
//! ## SeatId
//!
//! A contestant's fixed position around the board. Seats are 0-based and
//! determine the board offset of the contestant's track; they are
//! distinct from turn order, which starts at a random seat.
//!
//! ## TokenId
//!
//! A token is identified by its owner's seat and a 1-based ordinal within
//! that owner. The ordinal maps to a display letter (`A`, `B`, ...).
//!
//! ## SeatMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier supporting 1-255 contestants.
///
/// Seat indices are 0-based: the first contestant sits at `SeatId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId(pub u8);

impl SeatId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a match with `contestant_count` contestants.
    ///
    /// ```
    /// use rust_ludo::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all(3).collect();
    /// assert_eq!(seats, vec![SeatId::new(0), SeatId::new(1), SeatId::new(2)]);
    /// ```
    pub fn all(contestant_count: usize) -> impl Iterator<Item = SeatId> {
        (0..contestant_count as u8).map(SeatId)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Identity of a single token: its owner and its 1-based ordinal.
///
/// The identity never changes for the lifetime of a match. The display
/// letter is for presentation only and plays no part in the rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId {
    /// Owning contestant.
    pub seat: SeatId,
    /// 1-based ordinal within the owner.
    pub ordinal: u8,
}

impl TokenId {
    /// Create a new token ID. `ordinal` is 1-based.
    #[must_use]
    pub const fn new(seat: SeatId, ordinal: u8) -> Self {
        debug_assert!(ordinal > 0, "token ordinals are 1-based");
        Self { seat, ordinal }
    }

    /// Display letter: ordinal 1 is `A`, 2 is `B`, and so on.
    #[must_use]
    pub fn letter(self) -> char {
        char::from(b'A' + self.ordinal.saturating_sub(1))
    }

    /// 0-based position of this token within its owner's token list.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.ordinal as usize - 1
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_ludo::core::{SeatId, SeatMap};
///
/// let mut ranks: SeatMap<Option<u8>> = SeatMap::with_default(4);
/// ranks[SeatId::new(2)] = Some(1);
/// assert_eq!(ranks[SeatId::new(2)], Some(1));
/// assert_eq!(ranks[SeatId::new(0)], None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(contestant_count: usize, factory: impl Fn(SeatId) -> T) -> Self {
        assert!(contestant_count > 0, "Must have at least 1 contestant");
        assert!(contestant_count <= 255, "At most 255 contestants supported");

        let data = (0..contestant_count as u8)
            .map(|i| factory(SeatId(i)))
            .collect();

        Self { data }
    }

    /// Create a new SeatMap with default values.
    pub fn with_default(contestant_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(contestant_count, |_| T::default())
    }

    /// Number of seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a SeatMap has at least one seat.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over (SeatId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (SeatId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<SeatId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: SeatId) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<SeatId> for SeatMap<T> {
    fn index_mut(&mut self, seat: SeatId) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}
