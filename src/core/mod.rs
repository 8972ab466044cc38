//! Core types: seats, pieces, the piece store, actions, RNG, configuration
//! and errors.

pub mod action;
pub mod config;
pub mod error;
pub mod piece;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{CheatConfig, Pacing, SessionConfig};
pub use error::{ConfigError, Rejected};
pub use piece::{ParsePieceIdError, Piece, PieceId, PIECES_PER_PLAYER};
pub use player::{PlayerId, PlayerMap, SEAT_COUNT};
pub use rng::{GameRng, RandomSource};
pub use state::{PieceStore, StoreInvariantError};
