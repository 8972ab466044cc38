//! Piece identification and per-piece progress.
//!
//! Every seat owns four pieces. A piece identifier encodes its owner as a
//! letter prefix (`A` for seat 1 ... `D` for seat 4) followed by the piece
//! ordinal, so `C2` is the second piece of seat 3.
//!
//! ```
//! use ludo_engine::core::{PieceId, PlayerId};
//!
//! let id: PieceId = "C2".parse().unwrap();
//! assert_eq!(id.owner(), PlayerId::new(3));
//! assert_eq!(id.ordinal(), 2);
//! assert_eq!(id.to_string(), "C2");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::player::PlayerId;
use crate::board::{Cell, TERMINAL_TRAVEL};

/// Pieces per seat.
pub const PIECES_PER_PLAYER: usize = 4;

/// Identifier of a piece, unique across the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId {
    owner: PlayerId,
    ordinal: u8,
}

impl PieceId {
    /// Create a piece ID. `ordinal` is 1-based.
    ///
    /// Panics if `ordinal` is outside 1..=4.
    #[must_use]
    pub const fn new(owner: PlayerId, ordinal: u8) -> Self {
        assert!(
            ordinal >= 1 && ordinal as usize <= PIECES_PER_PLAYER,
            "piece ordinal must be 1..=4"
        );
        Self { owner, ordinal }
    }

    /// The seat owning this piece.
    #[must_use]
    pub const fn owner(self) -> PlayerId {
        self.owner
    }

    /// The 1-based ordinal within the owner's pieces.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self.ordinal
    }

    /// 0-based slot within the owner's piece array.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.ordinal as usize - 1
    }

    /// All four piece IDs of a seat, in ordinal order.
    pub fn all_of(owner: PlayerId) -> impl Iterator<Item = PieceId> {
        (1..=PIECES_PER_PLAYER as u8).map(move |ordinal| PieceId { owner, ordinal })
    }

    /// Whether two pieces belong to different seats.
    #[must_use]
    pub fn is_opponent_of(self, other: PieceId) -> bool {
        self.owner != other.owner
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.owner.letter(), self.ordinal)
    }
}

/// Error returned when a string is not a valid piece identifier.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid piece identifier {0:?} (expected A1..D4)")]
pub struct ParsePieceIdError(pub String);

impl FromStr for PieceId {
    type Err = ParsePieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceIdError(s.to_string());
        let mut chars = s.chars();
        let owner = chars.next().and_then(PlayerId::from_letter).ok_or_else(err)?;
        let ordinal = chars
            .as_str()
            .parse::<u8>()
            .ok()
            .filter(|o| (1..=PIECES_PER_PLAYER as u8).contains(o))
            .ok_or_else(err)?;
        Ok(Self { owner, ordinal })
    }
}

/// A piece and its progress.
///
/// `travel_count` is the number of steps taken since leaving the pocket
/// (0..=57). It decides move eligibility independently of the absolute
/// `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub position: Cell,
    pub travel_count: u8,
}

impl Piece {
    /// A piece sitting in its pocket.
    #[must_use]
    pub const fn in_pocket(id: PieceId) -> Self {
        Self {
            id,
            position: Cell::POCKET,
            travel_count: 0,
        }
    }

    #[must_use]
    pub fn is_pocketed(&self) -> bool {
        self.position.is_pocket()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.travel_count == TERMINAL_TRAVEL
    }

    /// On the board (track or home lane) and not yet home.
    #[must_use]
    pub fn is_in_play(&self) -> bool {
        !self.is_pocketed() && !self.is_finished()
    }

    /// Whether `dice` steps keep this piece at or before the terminal.
    #[must_use]
    pub fn can_advance(&self, dice: u8) -> bool {
        self.is_in_play() && self.travel_count.saturating_add(dice) <= TERMINAL_TRAVEL
    }

    /// Whether this piece can leave the pocket with `dice`.
    #[must_use]
    pub fn can_enter(&self, dice: u8) -> bool {
        self.is_pocketed() && dice == crate::board::ENTRY_FACE
    }

    /// Whether `dice` lands this piece exactly on the terminal.
    #[must_use]
    pub fn reaches_terminal_with(&self, dice: u8) -> bool {
        self.is_in_play() && self.travel_count.saturating_add(dice) == TERMINAL_TRAVEL
    }

    /// Send the piece back to its pocket.
    pub fn return_to_pocket(&mut self) {
        self.position = Cell::POCKET;
        self.travel_count = 0;
    }
}
