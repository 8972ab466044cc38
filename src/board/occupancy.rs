//! Derived cell occupancy index.
//!
//! The piece store is the single source of truth; `Occupancy` is rebuilt
//! from it whenever a reader needs "who stands on this cell". Pocketed
//! pieces are not indexed.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{PieceId, PieceStore};

use super::topology::Cell;

/// Pieces standing on one cell. Four covers the common case without
/// spilling to the heap.
pub type Occupants = SmallVec<[PieceId; 4]>;

/// Cell -> pieces index.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: FxHashMap<Cell, Occupants>,
}

impl Occupancy {
    /// Build the index from the authoritative store.
    #[must_use]
    pub fn from_store(store: &PieceStore) -> Self {
        let mut cells: FxHashMap<Cell, Occupants> = FxHashMap::default();
        for piece in store.iter().filter(|p| !p.is_pocketed()) {
            cells.entry(piece.position).or_default().push(piece.id);
        }
        Self { cells }
    }

    /// Pieces on `cell`, in seat then ordinal order.
    #[must_use]
    pub fn occupants(&self, cell: Cell) -> &[PieceId] {
        self.cells.get(&cell).map(|o| o.as_slice()).unwrap_or_default()
    }

    /// Pieces on `cell` that do not belong to `piece`'s owner.
    pub fn opponents_of(&self, piece: PieceId, cell: Cell) -> impl Iterator<Item = PieceId> + '_ {
        self.occupants(cell)
            .iter()
            .copied()
            .filter(move |other| other.is_opponent_of(piece))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over (cell, occupants) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &[PieceId])> {
        self.cells.iter().map(|(cell, o)| (*cell, o.as_slice()))
    }
}
