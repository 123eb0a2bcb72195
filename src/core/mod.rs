//! Core types: players, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerIdentity, PlayerMap};
pub use rng::GameRng;
pub use config::{MatchConfig, ReshufflePolicy, ThemePolicy};
pub use error::{FlipRejection, MemoryError, Result};
