//! Error types.
//!
//! The rules core has a single recoverable error kind: a request that is
//! not legal right now is [`Rejected`] and leaves the session untouched.
//! Configuration loading has its own [`ConfigError`].

use std::path::PathBuf;
use thiserror::Error;

use super::piece::PieceId;
use super::player::PlayerId;

/// A roll or move request that was refused. State is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("it is {active}'s turn, not {requested}'s")]
    NotYourTurn { requested: PlayerId, active: PlayerId },

    #[error("{0} is not seated in this game")]
    InactiveSeat(PlayerId),

    #[error("the dice were already rolled this turn")]
    AlreadyRolled,

    #[error("roll the dice before moving")]
    NotRolled,

    #[error("input is locked while a roll or move is in flight")]
    InputLocked,

    #[error("the game is over")]
    GameFinished,

    #[error("{piece} does not belong to {player}")]
    NotOwned { piece: PieceId, player: PlayerId },

    #[error("{0} has already reached home")]
    AlreadyFinished(PieceId),

    #[error("{piece} needs a 6 to leave the pocket, rolled {dice}")]
    WrongDiceForEntry { piece: PieceId, dice: u8 },

    #[error("{0} is still in its pocket")]
    InPocket(PieceId),

    #[error("{0} has already left its pocket")]
    NotInPocket(PieceId),

    #[error("{piece} at travel {travel} cannot move {dice} (overshoots home)")]
    Overshoot { piece: PieceId, travel: u8, dice: u8 },

    #[error("no piece can move with a {dice}")]
    NoLegalMove { dice: u8 },

    #[error("{0} is not a face of the die")]
    InvalidFace(u8),

    #[error("no roll is in flight")]
    NoRollInFlight,

    #[error("no move is in flight")]
    NoMoveInFlight,

    #[error("{0} is played automatically")]
    AutomatedSeat(PlayerId),

    #[error("{0} is played by hand")]
    ManualSeat(PlayerId),
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
