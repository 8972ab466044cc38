//! Authoritative piece store.
//!
//! Piece progress lives in exactly one place: a fixed `PlayerMap` of four
//! pieces per seat, keyed by `PieceId`. Anything positional (who stands on
//! which cell) is derived from here via [`crate::board::Occupancy`], so the
//! store and the board can never drift apart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::piece::{Piece, PieceId, PIECES_PER_PLAYER};
use super::player::{PlayerId, PlayerMap};
use crate::board::{Cell, Topology, TERMINAL_TRAVEL};

/// A broken store invariant. Raised for hand-built positions handed to
/// [`crate::session::Session::from_position`]; during play it means an
/// engine bug.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreInvariantError {
    #[error("{piece} is at its terminal {cell} with travel count {travel}")]
    TerminalWithoutFullTravel { piece: PieceId, cell: Cell, travel: u8 },
    #[error("{piece} has travel count 57 but sits on {cell}")]
    FullTravelOffTerminal { piece: PieceId, cell: Cell },
    #[error("{piece} is pocketed with travel count {travel}")]
    PocketWithTravel { piece: PieceId, travel: u8 },
    #[error("{piece} is on {cell} with travel count 0")]
    BoardWithoutTravel { piece: PieceId, cell: Cell },
    #[error("{piece} has travel count {travel} beyond the terminal")]
    TravelOverflow { piece: PieceId, travel: u8 },
    #[error("{piece} is on {cell} but travel count {travel} puts it on {expected}")]
    OffRoute { piece: PieceId, cell: Cell, travel: u8, expected: Cell },
}

/// Every piece on the board, four per seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceStore {
    pieces: PlayerMap<[Piece; PIECES_PER_PLAYER]>,
}

impl Default for PieceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceStore {
    /// All sixteen pieces in their pockets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pieces: PlayerMap::new(|player| {
                std::array::from_fn(|slot| {
                    Piece::in_pocket(PieceId::new(player, slot as u8 + 1))
                })
            }),
        }
    }

    #[must_use]
    pub fn get(&self, id: PieceId) -> &Piece {
        &self.pieces[id.owner()][id.slot()]
    }

    pub fn get_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.owner()][id.slot()]
    }

    /// The four pieces of one seat, in ordinal order.
    #[must_use]
    pub fn pieces(&self, player: PlayerId) -> &[Piece; PIECES_PER_PLAYER] {
        &self.pieces[player]
    }

    /// All pieces, seat by seat.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flat_map(|(_, pieces)| pieces.iter())
    }

    /// Put a piece at an explicit position. Used to set up positions for
    /// analysis and tests; normal play mutates pieces through the rules.
    pub fn place(&mut self, id: PieceId, position: Cell, travel_count: u8) {
        let piece = self.get_mut(id);
        piece.position = position;
        piece.travel_count = travel_count;
    }

    /// Send a piece back to its pocket.
    pub fn capture(&mut self, id: PieceId) {
        self.get_mut(id).return_to_pocket();
    }

    /// Number of a seat's pieces resting on the terminal.
    #[must_use]
    pub fn finished_count(&self, player: PlayerId) -> usize {
        self.pieces[player].iter().filter(|p| p.is_finished()).count()
    }

    /// Verify the position/travel invariants for every piece.
    ///
    /// - `position == terminal` iff `travel_count == 57`
    /// - `position == pocket` iff `travel_count == 0`
    /// - `position` is the cell the owner's route reaches after
    ///   `travel_count` steps
    pub fn check_invariants(&self, topology: &Topology) -> Result<(), StoreInvariantError> {
        for piece in self.iter() {
            let id = piece.id;
            let cell = piece.position;
            let travel = piece.travel_count;
            let terminal = topology.terminal(id.owner());

            let Some(expected) = topology.cell_at_travel(id.owner(), travel) else {
                return Err(StoreInvariantError::TravelOverflow { piece: id, travel });
            };
            if cell == terminal && travel != TERMINAL_TRAVEL {
                return Err(StoreInvariantError::TerminalWithoutFullTravel { piece: id, cell, travel });
            }
            if travel == TERMINAL_TRAVEL && cell != terminal {
                return Err(StoreInvariantError::FullTravelOffTerminal { piece: id, cell });
            }
            if cell.is_pocket() && travel != 0 {
                return Err(StoreInvariantError::PocketWithTravel { piece: id, travel });
            }
            if !cell.is_pocket() && travel == 0 {
                return Err(StoreInvariantError::BoardWithoutTravel { piece: id, cell });
            }
            if cell != expected {
                return Err(StoreInvariantError::OffRoute { piece: id, cell, travel, expected });
            }
        }
        Ok(())
    }
}
