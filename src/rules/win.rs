//! Win detection.

use crate::core::{Piece, PieceStore, PlayerId, PIECES_PER_PLAYER};

/// True iff all four pieces rest on the terminal.
#[must_use]
pub fn check_win(pieces: &[Piece; PIECES_PER_PLAYER]) -> bool {
    pieces.iter().all(Piece::is_finished)
}

/// The first seated player with all pieces home, if any.
///
/// Only the mover can complete a win, so at most one seat qualifies in a
/// game played through the session.
#[must_use]
pub fn find_winner(store: &PieceStore, player_count: usize) -> Option<PlayerId> {
    PlayerId::all(player_count).find(|&player| check_win(store.pieces(player)))
}
