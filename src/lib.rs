//! # ludo-engine
//!
//! Rules engine for a two-to-four seat Ludo race.
//!
//! ## Design Principles
//!
//! 1. **One source of truth**: piece progress lives only in the
//!    `PieceStore`; the cell occupancy index is derived from it.
//!
//! 2. **Validate, then apply**: every roll and move request is checked in
//!    full before anything changes. A rejected request leaves the session
//!    exactly as it was.
//!
//! 3. **Travel count decides**: move legality, overshoot and finishing are
//!    computed from a piece's travel count, never from its absolute cell.
//!
//! 4. **Host-paced**: the engine never sleeps. Animated hosts use the
//!    two-phase roll and stepwise move calls and pace playback themselves.
//!
//! ## Modules
//!
//! - `core`: seats, pieces, the piece store, actions, RNG, configuration, errors
//! - `board`: track geometry and the occupancy index
//! - `dice`: uniform and weighted dice
//! - `rules`: movement, capture and win detection
//! - `policy`: manual and automated seat policies
//! - `session`: the turn state machine and game session
//! - `autoplay`: headless game runner
//!
//! ## Example
//!
//! ```
//! use ludo_engine::{PlayerId, Session, SessionConfig};
//!
//! let mut session = Session::start(SessionConfig::new(2).with_seed(7)).unwrap();
//! let seat = PlayerId::new(1);
//!
//! let roll = session.roll_with(seat, 6).unwrap();
//! assert!(!roll.passed);
//!
//! let moved = session.request_move(seat, "A1".parse().unwrap()).unwrap();
//! assert_eq!(moved.travel_count, 1);
//! assert!(moved.extra_turn);
//! ```

pub mod autoplay;
pub mod board;
pub mod core;
pub mod dice;
pub mod policy;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CheatConfig, ConfigError, GameRng, Pacing, Piece, PieceId, PieceStore,
    PlayerId, PlayerMap, Rejected, SessionConfig,
};

pub use crate::board::{Cell, Occupancy, Topology};

pub use crate::dice::DiceMode;

pub use crate::policy::{SeatRole, TurnPolicy};

pub use crate::session::{
    AutoChoice, AutoMove, MoveOutcome, RollOutcome, Session, SessionState, TurnState,
};

pub use crate::autoplay::{GameRunner, GameSummary, MatchReport};
