//! Two-player turn alternation and scoring.

pub mod coordinator;

pub use coordinator::{TurnCoordinator, VersusOutcome};
