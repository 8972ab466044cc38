//! Seat identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are numbered 1..=4 to match the board's
//! pockets; seat 1 owns pieces `A1`..`A4`, seat 4 owns `D1`..`D4`.
//!
//! ## PlayerMap
//!
//! Fixed per-seat storage with O(1) access, indexed by `PlayerId`.
//! All four seats always exist; the configured player count only decides
//! which seats take part in the turn rotation.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats on the board.
pub const SEAT_COUNT: usize = 4;

/// Seat identifier, 1-based (`PlayerId(1)` is the first seat).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Create a seat ID.
    ///
    /// Panics if `seat` is outside 1..=4; use [`PlayerId::try_new`] for
    /// caller-supplied values.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        assert!(seat >= 1 && seat as usize <= SEAT_COUNT, "seat must be 1..=4");
        Self(seat)
    }

    /// Create a seat ID, returning `None` when out of range.
    #[must_use]
    pub const fn try_new(seat: u8) -> Option<Self> {
        if seat >= 1 && seat as usize <= SEAT_COUNT {
            Some(Self(seat))
        } else {
            None
        }
    }

    /// The 1-based seat number.
    #[must_use]
    pub const fn seat(self) -> u8 {
        self.0
    }

    /// The 0-based index for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Letter prefix used in piece identifiers (`A` for seat 1).
    #[must_use]
    pub const fn letter(self) -> char {
        (b'A' + self.0 - 1) as char
    }

    /// Inverse of [`PlayerId::letter`].
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            c @ 'A'..='D' => Some(Self(c as u8 - b'A' + 1)),
            _ => None,
        }
    }

    /// The seat that plays after this one in a game with `player_count`
    /// seats in rotation.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).next(4), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).next(2), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(3).next(3), PlayerId::new(1));
    /// ```
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self((self.0 as usize % player_count) as u8 + 1)
    }

    /// Whether this seat takes part in a game with `player_count` players.
    #[must_use]
    pub const fn is_active(self, player_count: usize) -> bool {
        (self.0 as usize) <= player_count
    }

    /// Iterate over the seats in rotation for `player_count` players.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count.min(SEAT_COUNT) as u8).map(PlayerId)
    }

    /// Iterate over all four seats, active or not.
    pub fn seats() -> impl Iterator<Item = PlayerId> {
        Self::all(SEAT_COUNT)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a fixed array with one entry per seat.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{PlayerId, PlayerMap};
///
/// let mut rolls: PlayerMap<u32> = PlayerMap::with_value(0);
/// rolls[PlayerId::new(2)] += 1;
/// assert_eq!(rolls[PlayerId::new(2)], 1);
/// assert_eq!(rolls[PlayerId::new(1)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(PlayerId(i as u8 + 1))),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs for all four seats.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs for all four seats.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
