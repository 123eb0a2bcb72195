//! # memory-match
//!
//! Game core for a themed memory-matching card game: deal eight pairs
//! face down, flip two at a time, keep the pairs you find.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven Time**: The engine never sleeps or spawns timers. Hosts
//!    call `advance(ms)` and receive every event that fell due.
//!
//! 2. **Illegal Input Is a No-Op**: Double clicks, clicks while locked and
//!    out-of-turn flips change nothing and come back as `FlipRejected`.
//!
//! 3. **Injected Persistence**: Scores and custom themes go through the
//!    `Storage` port. Nothing here knows about browsers or files.
//!
//! ## Architecture
//!
//! - **Smart Reshuffle**: After a streak of misses the unmatched cards are
//!   repositioned so memorised positions stop paying off.
//!
//! - **Persistent Data Structures**: Board order and the matched set use
//!   `im`, so snapshots are O(1) clones.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `themes`: Symbol sets and the theme catalog
//! - `board`: Cards and board generation
//! - `engine`: The match state machine and its events
//! - `turns`: Two-player turn alternation
//! - `session`: `MemoryGame` facade, score records, snapshots
//! - `storage`: Persistence port, score book, custom theme store

pub mod core;
pub mod themes;
pub mod board;
pub mod engine;
pub mod turns;
pub mod session;
pub mod storage;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    FlipRejection, GameRng, MatchConfig, MemoryError, PlayerId, PlayerIdentity, PlayerMap,
    ReshufflePolicy, Result, ThemePolicy,
};
pub use crate::board::{generate_board, Board, Card, CardId, PairId, BOARD_SIZE};
pub use crate::engine::{CardFace, GameEvent, MatchEngine, Phase, SessionState};
pub use crate::session::{MemoryGame, ScoreRecord, SessionRecorder, SessionSnapshot};
pub use crate::storage::{MemoryStorage, ScoreBook, Storage, ThemeStore};
pub use crate::themes::{Symbol, Theme, ThemeCatalog};
pub use crate::turns::{TurnCoordinator, VersusOutcome};
