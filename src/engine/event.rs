//! Outbound events for the presentation layer.
//!
//! Every inbound operation returns the events it caused, in order. The
//! engine itself emits the board and comparison events; the session facade
//! adds turn, outcome and persistence events.

use serde::{Deserialize, Serialize};

use crate::board::{CardId, PairId};
use crate::core::{FlipRejection, PlayerId};
use crate::session::ScoreRecord;
use crate::turns::VersusOutcome;

/// Something that happened in a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    /// A new board was dealt.
    Initialized { theme_id: String },
    /// Card positions changed (deal or reshuffle).
    BoardUpdated { order: Vec<CardId> },
    /// A card was turned face up.
    CardFlipped { card: CardId, position: usize },
    /// Two face-up cards were partners.
    Match { first: CardId, second: CardId, pair: PairId },
    /// Two face-up cards were not partners.
    Miss { first: CardId, second: CardId },
    /// Input locked; unmatched cards are about to move.
    ReshuffleStarted,
    /// Reshuffle done; input unlocked.
    ReshuffleFinished,
    /// The session timer advanced.
    Tick { elapsed: u64 },
    /// Every card is matched.
    Won { moves: u32, elapsed: u64 },
    /// A flip was ignored.
    FlipRejected { card: CardId, reason: FlipRejection },
    /// Two-player: the other seat now plays.
    TurnChanged { active: PlayerId },
    /// Two-player: a seat scored a pair.
    PointScored { player: PlayerId, score: u32 },
    /// Two-player: final result.
    GameOver { outcome: VersusOutcome },
    /// The solo score record was stored.
    ScoreSaved { record: ScoreRecord },
    /// Storing the score record failed. The result still stands.
    SaveFailed { reason: String },
}

impl GameEvent {
    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Initialized { .. } => "initialized",
            GameEvent::BoardUpdated { .. } => "board-updated",
            GameEvent::CardFlipped { .. } => "card-flipped",
            GameEvent::Match { .. } => "match",
            GameEvent::Miss { .. } => "miss",
            GameEvent::ReshuffleStarted => "reshuffle-started",
            GameEvent::ReshuffleFinished => "reshuffle-finished",
            GameEvent::Tick { .. } => "tick",
            GameEvent::Won { .. } => "won",
            GameEvent::FlipRejected { .. } => "flip-rejected",
            GameEvent::TurnChanged { .. } => "turn-changed",
            GameEvent::PointScored { .. } => "point-scored",
            GameEvent::GameOver { .. } => "game-over",
            GameEvent::ScoreSaved { .. } => "score-saved",
            GameEvent::SaveFailed { .. } => "save-failed",
        }
    }

    /// Whether this is a timer tick.
    #[must_use]
    pub fn is_tick(&self) -> bool {
        matches!(self, GameEvent::Tick { .. })
    }
}
