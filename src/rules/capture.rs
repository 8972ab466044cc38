//! Capture resolution.
//!
//! A landing captures only when the destination is not immune and holds
//! exactly one opponent piece. Two or more opponents form a block and
//! nobody is sent home. The mover's own pieces on the cell never matter.

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Occupancy, Topology};
use crate::core::{PieceId, PieceStore};

/// What happened on the landing cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    /// The opponent sent back to its pocket, if any.
    pub captured: Option<PieceId>,
    /// The landing cell was safe or a star.
    pub immune: bool,
    /// Two or more opponents were already on the cell.
    pub blocked: bool,
}

/// Decide what `mover` landing on `cell` does, given occupancy computed
/// after the move. Pure; see [`apply_landing`] for the mutating form.
#[must_use]
pub fn resolve_landing(
    topology: &Topology,
    mover: PieceId,
    cell: Cell,
    occupancy: &Occupancy,
) -> CaptureOutcome {
    if !cell.is_track() {
        return CaptureOutcome::default();
    }
    if topology.is_immune(cell) {
        return CaptureOutcome {
            immune: true,
            ..CaptureOutcome::default()
        };
    }

    let mut opponents = occupancy.opponents_of(mover, cell);
    match (opponents.next(), opponents.next()) {
        (Some(victim), None) => CaptureOutcome {
            captured: Some(victim),
            ..CaptureOutcome::default()
        },
        (Some(_), Some(_)) => CaptureOutcome {
            blocked: true,
            ..CaptureOutcome::default()
        },
        _ => CaptureOutcome::default(),
    }
}

/// Resolve the landing of `mover` at its current position and send any
/// victim back to its pocket.
pub fn apply_landing(store: &mut PieceStore, topology: &Topology, mover: PieceId) -> CaptureOutcome {
    let cell = store.get(mover).position;
    let occupancy = Occupancy::from_store(store);
    let outcome = resolve_landing(topology, mover, cell, &occupancy);
    if let Some(victim) = outcome.captured {
        store.capture(victim);
    }
    outcome
}
