//! Error types.
//!
//! Two families:
//! - `MemoryError`: construction and persistence failures, returned as `Err`
//! - `FlipRejection`: why a flip was ignored. Never an `Err`; illegal flips
//!   are no-ops reported through `GameEvent::FlipRejected`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors surfaced to callers.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// A theme cannot fill a board.
    #[error("theme '{theme}' has {found} symbols, at least {required} required")]
    InsufficientSymbols {
        theme: String,
        found: usize,
        required: usize,
    },

    /// A custom theme carries more symbols than the policy allows.
    #[error("{found} images supplied, at most {max} allowed")]
    TooManySymbols { found: usize, max: usize },

    /// A strict theme lookup found nothing.
    #[error("theme not found: {0}")]
    ThemeNotFound(String),

    /// A custom theme name is empty.
    #[error("theme name required")]
    InvalidThemeName,

    /// An uploaded image failed validation.
    #[error("{name}: {reason}")]
    InvalidUpload { name: String, reason: String },

    /// Sessions take one or two players.
    #[error("a session takes 1 or 2 players, got {0}")]
    PlayerCount(usize),

    /// Two seats were given the same account id.
    #[error("player '{0}' is seated twice")]
    DuplicatePlayer(String),

    /// A score record was requested before the board was cleared.
    #[error("session is not complete")]
    SessionNotComplete,

    /// The storage collaborator rejected a read or write.
    #[error("storage failure: {0}")]
    Persistence(String),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum FlipRejection {
    #[error("no active session")]
    NoSession,
    #[error("game is over")]
    GameOver,
    #[error("input locked")]
    InputLocked,
    #[error("card does not exist")]
    UnknownCard,
    #[error("card already flipped")]
    AlreadyFlipped,
    #[error("card already matched")]
    AlreadyMatched,
    #[error("not your turn, waiting for {active}")]
    NotYourTurn { active: PlayerId },
    #[error("player is not seated")]
    UnknownPlayer,
}
