//! Turn state machine.
//!
//! ```text
//! AwaitingRoll(p) --begin_roll--> RollLocked(p, face)
//! RollLocked      --commit_roll--> AwaitingMove(p, face)    some legal move
//!                              \-> AwaitingRoll(next)       nothing legal
//! AwaitingMove    --begin_move--> MoveLocked(p, face, motion)
//! MoveLocked      --finish_move--> AwaitingRoll(p or next) | Finished(p)
//! ```
//!
//! The locked states exist so an animating host can show the dice or
//! individual steps; every input is refused while one is active.

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::core::{PieceId, PlayerId};
use crate::rules::{MoveKind, Path};

/// A move in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub piece: PieceId,
    pub kind: MoveKind,
    /// Where the piece stood before the move.
    pub from: Cell,
    /// Steps not yet applied. Entering counts as one step.
    pub steps_left: u8,
    /// Cells visited so far.
    pub path: Path,
}

/// Where the turn stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    AwaitingRoll { player: PlayerId },
    RollLocked { player: PlayerId, face: u8 },
    AwaitingMove { player: PlayerId, dice: u8 },
    MoveLocked { player: PlayerId, dice: u8, motion: Motion },
    Finished { winner: PlayerId },
}

impl TurnState {
    /// The seat whose turn it is (the winner once finished).
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            TurnState::AwaitingRoll { player }
            | TurnState::RollLocked { player, .. }
            | TurnState::AwaitingMove { player, .. }
            | TurnState::MoveLocked { player, .. } => player,
            TurnState::Finished { winner } => winner,
        }
    }

    /// The face rolled this turn, if any.
    #[must_use]
    pub fn dice(&self) -> Option<u8> {
        match *self {
            TurnState::RollLocked { face, .. } => Some(face),
            TurnState::AwaitingMove { dice, .. } | TurnState::MoveLocked { dice, .. } => Some(dice),
            TurnState::AwaitingRoll { .. } | TurnState::Finished { .. } => None,
        }
    }

    /// A roll or move is in flight.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, TurnState::RollLocked { .. } | TurnState::MoveLocked { .. })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, TurnState::Finished { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let p = PlayerId::new(2);
        let awaiting = TurnState::AwaitingRoll { player: p };
        assert_eq!(awaiting.player(), p);
        assert_eq!(awaiting.dice(), None);
        assert!(!awaiting.is_locked());

        let rolling = TurnState::RollLocked { player: p, face: 4 };
        assert_eq!(rolling.dice(), Some(4));
        assert!(rolling.is_locked());

        let moving = TurnState::MoveLocked {
            player: p,
            dice: 6,
            motion: Motion {
                piece: "B1".parse().unwrap(),
                kind: MoveKind::Enter,
                from: Cell::POCKET,
                steps_left: 1,
                path: Path::new(),
            },
        };
        assert!(moving.is_locked());
        assert_eq!(moving.dice(), Some(6));

        let done = TurnState::Finished { winner: p };
        assert!(done.is_finished());
        assert_eq!(done.player(), p);
    }
}
