//! Score persistence and leaderboard queries.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::session::ScoreRecord;

use super::{append_to_list, read_list, Storage};

/// Storage key for the global score list.
pub const SCORES_KEY: &str = "memoryGameScores";

/// Entries returned by a default leaderboard query.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// A leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScore {
    /// 1-based rank.
    pub rank: usize,
    /// The underlying record.
    pub record: ScoreRecord,
}

/// Append-only list of score records.
#[derive(Clone, Debug, Default)]
pub struct ScoreBook<S> {
    storage: S,
}

impl<S: Storage> ScoreBook<S> {
    /// Wrap a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist one record.
    pub fn append(&mut self, record: &ScoreRecord) -> Result<()> {
        append_to_list(&mut self.storage, SCORES_KEY, record)
    }

    /// Every record, oldest first.
    pub fn all(&self) -> Result<Vec<ScoreRecord>> {
        read_list(&self.storage, SCORES_KEY)
    }

    /// Records for one player, oldest first.
    pub fn for_player(&self, player_id: &str) -> Result<Vec<ScoreRecord>> {
        let mut records = self.all()?;
        records.retain(|r| r.player_id == player_id);
        Ok(records)
    }

    /// Best records for a theme: fewest moves, then least time.
    /// Ties keep insertion order.
    pub fn leaderboard(&self, theme_id: &str, limit: usize) -> Result<Vec<RankedScore>> {
        let mut records = self.all()?;
        records.retain(|r| r.theme_id == theme_id);
        records.sort_by_key(|r| (r.move_count, r.elapsed));

        Ok(records
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, record)| RankedScore { rank: i + 1, record })
            .collect())
    }

    /// Borrow the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Borrow the storage backend mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give back the storage backend.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
