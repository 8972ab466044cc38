//! Game rules: movement, capture and win detection.
//!
//! Everything here operates on a [`crate::core::PieceStore`] and a
//! [`crate::board::Topology`] and knows nothing about turns. Turn order,
//! input locking and seat policies live in [`crate::session`].

pub mod capture;
pub mod movement;
pub mod win;

pub use capture::{apply_landing, resolve_landing, CaptureOutcome};
pub use movement::{
    advance, enter, has_legal_move, legal_moves, place_on_entry, step, validate_advance,
    validate_enter, validate_move, walk, MoveKind, Moved, Path, Walk,
};
pub use win::{check_win, find_winner};
