//! Piece-selection heuristics for automated seats.
//!
//! Both heuristics only ever return a piece that has a legal move with the
//! given dice. Ties go to the lowest ordinal.

use std::cmp::Reverse;

use crate::core::{Piece, PieceId, PIECES_PER_PLAYER};

/// Favoured seat: finish a piece if the dice allow it exactly, otherwise
/// push the most advanced movable piece, otherwise bring a piece out on a
/// 6.
///
/// ```
/// use ludo_engine::board::Cell;
/// use ludo_engine::core::{PieceStore, PlayerId};
/// use ludo_engine::policy::best_piece;
///
/// let mut store = PieceStore::new();
/// let a1 = "A1".parse().unwrap();
/// let a2 = "A2".parse().unwrap();
/// store.place(a1, Cell::new(30), 30);
/// store.place(a2, Cell::new(114), 54);
///
/// // A 3 takes A2 exactly home.
/// assert_eq!(best_piece(3, store.pieces(PlayerId::new(1))), Some(a2));
/// ```
#[must_use]
pub fn best_piece(dice: u8, pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId> {
    if let Some(home_run) = pieces.iter().find(|p| p.reaches_terminal_with(dice)) {
        return Some(home_run.id);
    }
    if let Some(furthest) = pieces
        .iter()
        .filter(|p| p.can_advance(dice))
        .min_by_key(|p| Reverse(p.travel_count))
    {
        return Some(furthest.id);
    }
    first_enterable(dice, pieces)
}

/// Disfavoured seat: push the least advanced movable piece, otherwise
/// bring a piece out on a 6.
#[must_use]
pub fn worst_piece(dice: u8, pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId> {
    pieces
        .iter()
        .filter(|p| p.can_advance(dice))
        .min_by_key(|p| p.travel_count)
        .map(|p| p.id)
        .or_else(|| first_enterable(dice, pieces))
}

fn first_enterable(dice: u8, pieces: &[Piece; PIECES_PER_PLAYER]) -> Option<PieceId> {
    pieces.iter().find(|p| p.can_enter(dice)).map(|p| p.id)
}
