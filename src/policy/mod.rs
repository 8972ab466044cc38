//! Seat policies.
//!
//! A seat is either driven by the host (manual) or played automatically
//! with loaded dice (favoured / disfavoured). The role of every seat is
//! derived from the [`CheatConfig`]: when cheat mode names a favoured
//! seat, that seat is [`SeatRole::Favored`] and every other seat
//! [`SeatRole::Disfavored`]; otherwise everyone is [`SeatRole::Manual`].
//!
//! ```
//! use ludo_engine::core::{CheatConfig, PlayerId};
//! use ludo_engine::policy::SeatRole;
//!
//! let cheat = CheatConfig::favoring(PlayerId::new(2));
//! assert_eq!(SeatRole::for_seat(&cheat, PlayerId::new(2)), SeatRole::Favored);
//! assert_eq!(SeatRole::for_seat(&cheat, PlayerId::new(1)), SeatRole::Disfavored);
//! assert!(SeatRole::for_seat(&CheatConfig::disabled(), PlayerId::new(2)).policy().dice_mode().weights().is_none());
//! ```

pub mod heuristic;

use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{CheatConfig, GameRng, Piece, PieceId, PlayerId, PIECES_PER_PLAYER};
use crate::dice::DiceMode;

pub use heuristic::{best_piece, worst_piece};

/// Favoured seat "thinking" delay, in milliseconds.
pub const FAVORED_THINK_MS: Range<u64> = 700..1501;

/// Disfavoured seat "thinking" delay, in milliseconds.
pub const DISFAVORED_THINK_MS: Range<u64> = 500..1401;

/// How a seat rolls and picks pieces.
pub trait TurnPolicy: Send + Sync {
    /// Dice generation mode for this seat.
    fn dice_mode(&self) -> DiceMode;

    /// Pick a piece to move with `dice`. `None` when the seat is manual or
    /// has nothing legal to do.
    fn select_piece(&self, dice: u8, pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId>;

    /// How long the host should pause before applying an automatic move.
    /// `None` for manual seats.
    fn think_time(&self, rng: &mut GameRng) -> Option<Duration>;

    /// Whether moves for this seat are chosen by the engine.
    fn is_automated(&self) -> bool;
}

/// Host-driven seat with fair dice.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualPolicy;

impl TurnPolicy for ManualPolicy {
    fn dice_mode(&self) -> DiceMode {
        DiceMode::Uniform
    }

    fn select_piece(&self, _dice: u8, _pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId> {
        None
    }

    fn think_time(&self, _rng: &mut GameRng) -> Option<Duration> {
        None
    }

    fn is_automated(&self) -> bool {
        false
    }
}

/// Automated seat with high-skewed dice and the greedy heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct FavoredPolicy;

impl TurnPolicy for FavoredPolicy {
    fn dice_mode(&self) -> DiceMode {
        DiceMode::Favored
    }

    fn select_piece(&self, dice: u8, pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId> {
        best_piece(dice, pieces)
    }

    fn think_time(&self, rng: &mut GameRng) -> Option<Duration> {
        Some(Duration::from_millis(rng.gen_range_u64(FAVORED_THINK_MS)))
    }

    fn is_automated(&self) -> bool {
        true
    }
}

/// Automated seat with low-skewed dice and the sandbagging heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisfavoredPolicy;

impl TurnPolicy for DisfavoredPolicy {
    fn dice_mode(&self) -> DiceMode {
        DiceMode::Disfavored
    }

    fn select_piece(&self, dice: u8, pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId> {
        worst_piece(dice, pieces)
    }

    fn think_time(&self, rng: &mut GameRng) -> Option<Duration> {
        Some(Duration::from_millis(rng.gen_range_u64(DISFAVORED_THINK_MS)))
    }

    fn is_automated(&self) -> bool {
        true
    }
}

static MANUAL: ManualPolicy = ManualPolicy;
static FAVORED: FavoredPolicy = FavoredPolicy;
static DISFAVORED: DisfavoredPolicy = DisfavoredPolicy;

/// The role a seat plays under the current cheat configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatRole {
    #[default]
    Manual,
    Favored,
    Disfavored,
}

impl SeatRole {
    /// Role of `player` under `cheat`.
    #[must_use]
    pub fn for_seat(cheat: &CheatConfig, player: PlayerId) -> Self {
        match cheat.favored() {
            None => SeatRole::Manual,
            Some(favored) if favored == player => SeatRole::Favored,
            Some(_) => SeatRole::Disfavored,
        }
    }

    /// The policy implementing this role.
    #[must_use]
    pub fn policy(self) -> &'static dyn TurnPolicy {
        match self {
            SeatRole::Manual => &MANUAL,
            SeatRole::Favored => &FAVORED,
            SeatRole::Disfavored => &DISFAVORED,
        }
    }

    #[must_use]
    pub fn is_automated(self) -> bool {
        self != SeatRole::Manual
    }
}
