//! Turn coordinator for the two-player variant.
//!
//! ## Rules
//!
//! - A match scores a point for the active seat, who keeps the turn.
//! - A miss passes the turn to the other seat.
//! - Only the active seat may flip. Anyone else gets `NotYourTurn`.
//! - Higher score wins; equal scores tie. No tiebreaker.
//!
//! The coordinator never touches the board. It reacts to the engine's
//! `Match` / `Miss` events, which the session facade forwards.

use serde::{Deserialize, Serialize};

use crate::core::{FlipRejection, MemoryError, PlayerId, PlayerIdentity, PlayerMap, Result};
use crate::engine::GameEvent;

/// Seats at a versus table.
pub const VERSUS_PLAYERS: usize = 2;

/// Final result of a two-player game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum VersusOutcome {
    /// One seat outscored the other.
    Winner {
        seat: PlayerId,
        player: PlayerIdentity,
        score: u32,
    },
    /// Both seats finished level.
    Tie { score: u32 },
}

/// Tracks whose turn it is and how many pairs each seat has found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnCoordinator {
    players: PlayerMap<PlayerIdentity>,
    active: PlayerId,
    scores: PlayerMap<u32>,
}

impl TurnCoordinator {
    /// Seat exactly two players with distinct ids; the first one starts.
    pub fn new(players: Vec<PlayerIdentity>) -> Result<Self> {
        if players.len() != VERSUS_PLAYERS {
            return Err(MemoryError::PlayerCount(players.len()));
        }
        if players[0].id == players[1].id {
            return Err(MemoryError::DuplicatePlayer(players[0].id.clone()));
        }
        Ok(Self {
            players: PlayerMap::from_vec(players),
            active: PlayerId::new(0),
            scores: PlayerMap::with_value(VERSUS_PLAYERS, 0),
        })
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// Identity seated at `seat`.
    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&PlayerIdentity> {
        self.players.get(seat)
    }

    /// Both seated players.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerIdentity> {
        &self.players
    }

    /// Pairs found by `seat`.
    #[must_use]
    pub fn score(&self, seat: PlayerId) -> u32 {
        self.scores.get(seat).copied().unwrap_or(0)
    }

    /// Per-seat scores.
    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    /// Seat of the player with account id `player_id`.
    #[must_use]
    pub fn seat_of(&self, player_id: &str) -> Option<PlayerId> {
        self.players.find(|p| p.id == player_id)
    }

    /// Who is flipping. `None` means the active seat (hot-seat play).
    pub fn check_turn(&self, by: Option<&str>) -> std::result::Result<PlayerId, FlipRejection> {
        let Some(player_id) = by else {
            return Ok(self.active);
        };
        match self.seat_of(player_id) {
            Some(seat) if seat == self.active => Ok(seat),
            Some(_) => Err(FlipRejection::NotYourTurn { active: self.active }),
            None => Err(FlipRejection::UnknownPlayer),
        }
    }

    /// Credit the active seat with a pair. The turn stays.
    pub fn on_match(&mut self) -> GameEvent {
        let seat = self.active;
        self.scores[seat] += 1;
        GameEvent::PointScored {
            player: seat,
            score: self.scores[seat],
        }
    }

    /// Pass the turn to the other seat.
    pub fn on_miss(&mut self) -> GameEvent {
        self.active = self.active.next(VERSUS_PLAYERS);
        GameEvent::TurnChanged { active: self.active }
    }

    /// Compare scores.
    #[must_use]
    pub fn outcome(&self) -> VersusOutcome {
        let first = PlayerId::new(0);
        let second = PlayerId::new(1);
        let (a, b) = (self.score(first), self.score(second));

        let seat = match a.cmp(&b) {
            std::cmp::Ordering::Equal => return VersusOutcome::Tie { score: a },
            std::cmp::Ordering::Greater => first,
            std::cmp::Ordering::Less => second,
        };
        VersusOutcome::Winner {
            seat,
            player: self.players[seat].clone(),
            score: self.score(seat),
        }
    }

    /// Zero the scores and give the first seat the turn.
    pub fn reset(&mut self) {
        self.active = PlayerId::new(0);
        self.scores = PlayerMap::with_value(VERSUS_PLAYERS, 0);
    }
}
