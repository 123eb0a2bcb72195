//! Completed-game records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{MemoryError, PlayerIdentity, Result};
use crate::engine::{Phase, SessionState};
use crate::themes::Theme;

/// The tally of one finished solo game, handed to score storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Player account id.
    pub player_id: String,
    /// Player display name.
    pub display_name: String,
    /// Catalog id of the theme played.
    pub theme_id: String,
    /// Theme display name at the time of play.
    pub theme_name: String,
    /// Completed two-card comparisons.
    pub move_count: u32,
    /// Timer units elapsed until the last match.
    #[serde(rename = "elapsedTime")]
    pub elapsed: u64,
    /// When the game was completed.
    pub timestamp: DateTime<Utc>,
}

/// Packages a won session into a `ScoreRecord`.
///
/// Pure data assembly: no I/O, no retries.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionRecorder;

impl SessionRecorder {
    /// Create a recorder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the record for a won session, stamped now.
    pub fn record_completion(
        &self,
        session: &SessionState,
        player: &PlayerIdentity,
        theme: &Theme,
    ) -> Result<ScoreRecord> {
        self.record_completion_at(session, player, theme, Utc::now())
    }

    /// Build the record for a won session with an explicit timestamp.
    pub fn record_completion_at(
        &self,
        session: &SessionState,
        player: &PlayerIdentity,
        theme: &Theme,
        timestamp: DateTime<Utc>,
    ) -> Result<ScoreRecord> {
        if session.phase() != Phase::Won {
            return Err(MemoryError::SessionNotComplete);
        }

        Ok(ScoreRecord {
            player_id: player.id.clone(),
            display_name: player.username.clone(),
            theme_id: theme.id.clone(),
            theme_name: theme.name.clone(),
            move_count: session.move_count(),
            elapsed: session.elapsed(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CardId, PairId};
    use crate::core::MatchConfig;
    use crate::engine::MatchEngine;
    use crate::themes::builtin_themes;

    fn won_engine() -> MatchEngine {
        let mut engine = MatchEngine::new(MatchConfig::default().with_seed(1));
        engine.initialize(&builtin_themes()[0]).unwrap();
        engine.advance(2500);
        for pair in 0..8 {
            engine.flip(CardId::for_pair(PairId::new(pair), 0));
            engine.flip(CardId::for_pair(PairId::new(pair), 1));
            engine.advance(1000);
        }
        engine
    }

    #[test]
    fn test_record_completion() {
        let engine = won_engine();
        let session = engine.session().unwrap();
        let player = PlayerIdentity::new("u1", "Ada");
        let stamp = Utc::now();

        let record = SessionRecorder::new()
            .record_completion_at(session, &player, &builtin_themes()[0], stamp)
            .unwrap();

        assert_eq!(record.player_id, "u1");
        assert_eq!(record.display_name, "Ada");
        assert_eq!(record.theme_id, "animals");
        assert_eq!(record.theme_name, "Animals");
        assert_eq!(record.move_count, 8);
        assert_eq!(record.elapsed, session.elapsed());
        assert_eq!(record.timestamp, stamp);
    }

    #[test]
    fn test_record_requires_win() {
        let mut engine = MatchEngine::new(MatchConfig::default().with_seed(1));
        engine.initialize(&builtin_themes()[0]).unwrap();

        let result = SessionRecorder::new().record_completion(
            engine.session().unwrap(),
            &PlayerIdentity::new("u1", "Ada"),
            &builtin_themes()[0],
        );
        assert!(matches!(result, Err(MemoryError::SessionNotComplete)));
    }

    #[test]
    fn test_record_json_shape() {
        let engine = won_engine();
        let record = SessionRecorder::new()
            .record_completion(
                engine.session().unwrap(),
                &PlayerIdentity::new("u1", "Ada"),
                &builtin_themes()[0],
            )
            .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["playerId"], "u1");
        assert_eq!(json["moveCount"], 8);
        assert_eq!(json["elapsedTime"], record.elapsed);
        assert!(json.get("elapsed").is_none());

        let back: ScoreRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
