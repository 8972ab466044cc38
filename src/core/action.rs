//! Applied actions and the session history.
//!
//! Every roll and every completed move is recorded so hosts can replay or
//! inspect a game. Records are cheap to clone; the session keeps them in a
//! persistent `im::Vector`.

use serde::{Deserialize, Serialize};

use super::piece::PieceId;
use super::player::PlayerId;
use crate::board::Cell;

/// What a seat did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Rolled the dice and got `face`.
    Roll { face: u8 },
    /// No legal move existed for the roll; the turn passed on.
    Pass { face: u8 },
    /// Moved `piece` from `from` to `to`.
    Move {
        piece: PieceId,
        from: Cell,
        to: Cell,
        captured: Option<PieceId>,
    },
}

impl Action {
    /// Whether this action changed a piece's position.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}

/// A recorded action with ordering metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
