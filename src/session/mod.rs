//! Session layer: the `MemoryGame` facade, completion records and
//! renderer snapshots.

pub mod game;
pub mod recorder;
pub mod snapshot;

pub use game::MemoryGame;
pub use recorder::{ScoreRecord, SessionRecorder};
pub use snapshot::{format_elapsed, CardView, SeatView, SessionSnapshot};
