//! Match engine: the single-session state machine.
//!
//! - `MatchEngine`: flip handling, delayed resolution, reshuffles, timer
//! - `SessionState`: the observable state of one playthrough
//! - `GameEvent`: everything the engine (and the session facade) reports

pub mod engine;
pub mod event;
pub mod state;

pub use engine::MatchEngine;
pub use event::GameEvent;
pub use state::{CardFace, Phase, SessionState};
