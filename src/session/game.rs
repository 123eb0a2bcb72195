//! `MemoryGame`: engine, turns, recording and score persistence in one place.
//!
//! ## Event routing
//!
//! The engine reports `Match`, `Miss` and `Won`. The facade appends what
//! follows from them:
//!
//! - two players: `PointScored` after a match, `TurnChanged` after a miss,
//!   `GameOver` after the win
//! - one player: `ScoreSaved` (or `SaveFailed`) after the win
//!
//! A failed save never rolls anything back; the won session stays won.

use log::{error, info};

use crate::board::CardId;
use crate::core::{FlipRejection, MatchConfig, MemoryError, PlayerId, PlayerIdentity, Result};
use crate::engine::{GameEvent, MatchEngine, Phase, SessionState};
use crate::storage::{ScoreBook, Storage};
use crate::themes::{Theme, ThemeCatalog};
use crate::turns::{TurnCoordinator, VersusOutcome};

use super::recorder::{ScoreRecord, SessionRecorder};
use super::snapshot::SessionSnapshot;

/// A playable memory game backed by score storage `S`.
///
/// ```
/// use memory_match::core::{MatchConfig, PlayerIdentity};
/// use memory_match::session::MemoryGame;
/// use memory_match::storage::MemoryStorage;
/// use memory_match::themes::ThemeCatalog;
///
/// let catalog = ThemeCatalog::default();
/// let mut game = MemoryGame::new(MatchConfig::default().with_seed(7), MemoryStorage::new());
/// game.start(&catalog, "space", vec![PlayerIdentity::new("u1", "Ada")]).unwrap();
///
/// let snapshot = game.snapshot().unwrap();
/// assert_eq!(snapshot.theme_id, "space");
/// assert_eq!(snapshot.cards.len(), 16);
/// ```
#[derive(Debug)]
pub struct MemoryGame<S> {
    engine: MatchEngine,
    players: Vec<PlayerIdentity>,
    turns: Option<TurnCoordinator>,
    scores: ScoreBook<S>,
    recorder: SessionRecorder,
    last_record: Option<ScoreRecord>,
    outcome: Option<VersusOutcome>,
}

impl<S: Storage> MemoryGame<S> {
    /// Create a game with no session yet.
    pub fn new(config: MatchConfig, storage: S) -> Self {
        Self {
            engine: MatchEngine::new(config),
            players: Vec::new(),
            turns: None,
            scores: ScoreBook::new(storage),
            recorder: SessionRecorder::new(),
            last_record: None,
            outcome: None,
        }
    }

    /// Start a session on `theme` for one or two players.
    ///
    /// On error nothing changes.
    pub fn initialize(&mut self, theme: &Theme, players: Vec<PlayerIdentity>) -> Result<Vec<GameEvent>> {
        let turns = match players.len() {
            1 => None,
            2 => Some(TurnCoordinator::new(players.clone())?),
            n => return Err(MemoryError::PlayerCount(n)),
        };
        let events = self.engine.initialize(theme)?;

        self.players = players;
        self.turns = turns;
        self.last_record = None;
        self.outcome = None;
        Ok(events)
    }

    /// Start a session on a catalog theme, falling back to the default
    /// theme for unknown ids.
    pub fn start(
        &mut self,
        catalog: &ThemeCatalog,
        theme_id: &str,
        players: Vec<PlayerIdentity>,
    ) -> Result<Vec<GameEvent>> {
        self.initialize(catalog.resolve(theme_id), players)
    }

    /// Flip a card on behalf of `by` (an account id).
    ///
    /// In two-player games `None` stands for whoever is active. In solo
    /// games `by` must be the seated player when given.
    pub fn flip(&mut self, card: CardId, by: Option<&str>) -> Vec<GameEvent> {
        if let Err(reason) = self.engine.check_flip(card).and_then(|()| self.check_player(by)) {
            return vec![GameEvent::FlipRejected { card, reason }];
        }
        self.engine.flip(card)
    }

    fn check_player(&self, by: Option<&str>) -> std::result::Result<(), FlipRejection> {
        if let Some(turns) = &self.turns {
            return turns.check_turn(by).map(|_| ());
        }
        match by {
            Some(id) if self.players.first().map_or(true, |p| p.id != id) => {
                Err(FlipRejection::UnknownPlayer)
            }
            _ => Ok(()),
        }
    }

    /// Advance time, routing resolved comparisons and the win.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for event in self.engine.advance(delta_ms) {
            let follow_up = match &event {
                GameEvent::Match { .. } => self.turns.as_mut().map(TurnCoordinator::on_match),
                GameEvent::Miss { .. } => self.turns.as_mut().map(TurnCoordinator::on_miss),
                GameEvent::Won { .. } => Some(self.finish()),
                _ => None,
            };
            events.push(event);
            events.extend(follow_up);
        }
        events
    }

    fn finish(&mut self) -> GameEvent {
        if let Some(turns) = &self.turns {
            let outcome = turns.outcome();
            info!("Versus game over: {:?}", outcome);
            self.outcome = Some(outcome.clone());
            return GameEvent::GameOver { outcome };
        }

        let record = match (self.engine.session(), self.engine.theme(), self.players.first()) {
            (Some(session), Some(theme), Some(player)) => {
                self.recorder.record_completion(session, player, theme)
            }
            _ => Err(MemoryError::SessionNotComplete),
        };
        let saved = record.and_then(|record| {
            self.last_record = Some(record.clone());
            self.scores.append(&record).map(|()| record)
        });

        match saved {
            Ok(record) => {
                info!(
                    "Saved score for {}: {} moves, {}",
                    record.display_name,
                    record.move_count,
                    super::format_elapsed(record.elapsed)
                );
                GameEvent::ScoreSaved { record }
            }
            Err(err) => {
                error!("Failed to save score: {}", err);
                GameEvent::SaveFailed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Deal a new board with the same theme and players.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        let events = self.engine.reset();
        if !events.is_empty() {
            if let Some(turns) = self.turns.as_mut() {
                turns.reset();
            }
            self.last_record = None;
            self.outcome = None;
        }
        events
    }

    /// Renderer view of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let session = self.engine.session()?;
        let theme = self.engine.theme()?;
        Some(SessionSnapshot::capture(session, theme, self.turns.as_ref()))
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Current session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        self.engine.session()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Seated players, in seat order.
    #[must_use]
    pub fn players(&self) -> &[PlayerIdentity] {
        &self.players
    }

    /// Turn state, in two-player games.
    #[must_use]
    pub fn turns(&self) -> Option<&TurnCoordinator> {
        self.turns.as_ref()
    }

    /// Seat to move, in two-player games.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.turns.as_ref().map(TurnCoordinator::active)
    }

    /// Record of the last solo win, saved or not.
    #[must_use]
    pub fn last_record(&self) -> Option<&ScoreRecord> {
        self.last_record.as_ref()
    }

    /// Result of the last two-player game.
    #[must_use]
    pub fn outcome(&self) -> Option<&VersusOutcome> {
        self.outcome.as_ref()
    }

    /// Score history and leaderboards.
    #[must_use]
    pub fn scores(&self) -> &ScoreBook<S> {
        &self.scores
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.scores.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PairId;
    use crate::storage::MemoryStorage;
    use crate::themes::builtin_themes;

    fn card(pair: u8, side: u8) -> CardId {
        CardId::for_pair(PairId::new(pair), side)
    }

    fn game() -> MemoryGame<MemoryStorage> {
        MemoryGame::new(MatchConfig::default().with_seed(5), MemoryStorage::new())
    }

    fn ada() -> PlayerIdentity {
        PlayerIdentity::new("u1", "Ada")
    }

    #[test]
    fn test_player_count_checked() {
        let mut game = game();
        let theme = &builtin_themes()[0];

        assert!(matches!(
            game.initialize(theme, Vec::new()),
            Err(MemoryError::PlayerCount(0))
        ));
        let three = vec![ada(), PlayerIdentity::new("b", "B"), PlayerIdentity::new("c", "C")];
        assert!(matches!(game.initialize(theme, three), Err(MemoryError::PlayerCount(3))));
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_duplicate_seats_rejected() {
        let mut game = game();
        let guests = vec![PlayerIdentity::new("guest", "A"), PlayerIdentity::new("guest", "B")];

        let result = game.initialize(&builtin_themes()[0], guests);

        assert!(matches!(result, Err(MemoryError::DuplicatePlayer(_))));
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.turns().is_none());
    }

    #[test]
    fn test_solo_rejects_strangers() {
        let mut game = game();
        game.initialize(&builtin_themes()[0], vec![ada()]).unwrap();

        let events = game.flip(card(0, 0), Some("mallory"));
        assert_eq!(
            events,
            vec![GameEvent::FlipRejected {
                card: card(0, 0),
                reason: FlipRejection::UnknownPlayer
            }]
        );
        assert!(matches!(game.flip(card(0, 0), Some("u1"))[0], GameEvent::CardFlipped { .. }));
        assert!(matches!(game.flip(card(0, 1), None)[0], GameEvent::CardFlipped { .. }));
    }

    #[test]
    fn test_solo_win_saves_score() {
        let mut game = game();
        game.initialize(&builtin_themes()[3], vec![ada()]).unwrap();

        let mut events = Vec::new();
        for pair in 0..8 {
            game.flip(card(pair, 0), None);
            game.flip(card(pair, 1), None);
            events.extend(game.advance(1000));
        }

        let saved = events
            .iter()
            .find_map(|e| match e {
                GameEvent::ScoreSaved { record } => Some(record.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(saved.theme_id, "space");
        assert_eq!(saved.move_count, 8);
        assert_eq!(game.last_record(), Some(&saved));
        assert_eq!(game.scores().all().unwrap(), vec![saved]);
    }

    #[test]
    fn test_reset_clears_record() {
        let mut game = game();
        game.initialize(&builtin_themes()[0], vec![ada()]).unwrap();
        for pair in 0..8 {
            game.flip(card(pair, 0), None);
            game.flip(card(pair, 1), None);
            game.advance(1000);
        }
        assert!(game.last_record().is_some());

        let events = game.reset();

        assert_eq!(events.len(), 2);
        assert!(game.last_record().is_none());
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(game.scores().all().unwrap().len(), 1);
    }

    #[test]
    fn test_snapshot_requires_session() {
        let game = game();
        assert!(game.snapshot().is_none());
    }
}
