//! Game session: turn state machine, input locking and history.

pub mod engine;
pub mod turn;

pub use engine::{AutoChoice, AutoMove, MoveOutcome, RollOutcome, Session, SessionState};
pub use turn::{Motion, TurnState};
