//! Game bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::board::CardId;
use crate::core::{MatchConfig, PlayerIdentity, ReshufflePolicy};
use crate::engine::{CardFace, GameEvent};
use crate::session::MemoryGame;
use crate::storage::MemoryStorage;
use crate::themes::ThemeCatalog;

/// Observation value for a face-down position.
const HIDDEN: i16 = -1;

fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(format!("{}", err))
}

fn encode_events(events: &[GameEvent]) -> PyResult<Vec<String>> {
    events
        .iter()
        .map(|e| serde_json::to_string(e).map_err(to_py_err))
        .collect()
}

/// Ids of the built-in themes.
#[pyfunction]
pub fn theme_ids() -> Vec<String> {
    ThemeCatalog::default().themes().map(|t| t.id.clone()).collect()
}

/// Python wrapper for MemoryGame with in-memory score storage.
///
/// Events are returned as JSON strings tagged with a `type` field.
#[pyclass(name = "MemoryGame")]
pub struct PyMemoryGame {
    game: MemoryGame<MemoryStorage>,
    catalog: ThemeCatalog,
}

#[pymethods]
impl PyMemoryGame {
    /// Create a game and deal the first board.
    ///
    /// # Arguments
    /// - theme_id: Catalog theme; unknown ids fall back to the default
    /// - players: One or two (id, username) tuples
    /// - seed: RNG seed for deterministic deals
    /// - reshuffle_after: Misses in a row before a reshuffle (0 disables)
    #[new]
    #[pyo3(signature = (
        theme_id = "animals",
        players = None,
        seed = None,
        reshuffle_after = 3
    ))]
    fn new(
        theme_id: &str,
        players: Option<Vec<(String, String)>>,
        seed: Option<u64>,
        reshuffle_after: u32,
    ) -> PyResult<Self> {
        let reshuffle = match reshuffle_after {
            0 => ReshufflePolicy::Never,
            n => ReshufflePolicy::AfterConsecutiveMisses(n),
        };
        let mut config = MatchConfig::default().with_reshuffle(reshuffle);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        let players = players
            .unwrap_or_else(|| vec![("player".to_string(), "Player".to_string())])
            .into_iter()
            .map(|(id, name)| PlayerIdentity::new(id, name))
            .collect();

        let catalog = ThemeCatalog::new(config.theme_policy);
        let mut game = MemoryGame::new(config, MemoryStorage::new());
        game.start(&catalog, theme_id, players).map_err(to_py_err)?;
        Ok(Self { game, catalog })
    }

    /// Flip the card with raw id `card`, optionally on behalf of a player id.
    #[pyo3(signature = (card, by = None))]
    fn flip(&mut self, card: u8, by: Option<&str>) -> PyResult<Vec<String>> {
        encode_events(&self.game.flip(CardId::new(card), by))
    }

    /// Advance the clock by `ms` milliseconds.
    fn advance(&mut self, ms: u64) -> PyResult<Vec<String>> {
        encode_events(&self.game.advance(ms))
    }

    /// Deal a new board with the same theme and players.
    fn reset(&mut self) -> PyResult<Vec<String>> {
        encode_events(&self.game.reset())
    }

    /// Start over on another theme.
    fn switch_theme(&mut self, theme_id: &str) -> PyResult<Vec<String>> {
        let players = self.game.players().to_vec();
        let events = self
            .game
            .start(&self.catalog, theme_id, players)
            .map_err(to_py_err)?;
        encode_events(&events)
    }

    /// Board observation: pair id for face-up or matched positions, -1 for
    /// face-down ones.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i16>> {
        let values: Vec<i16> = self
            .game
            .session()
            .map(|session| {
                session
                    .board()
                    .iter()
                    .map(|card| match session.face_of(card.id) {
                        CardFace::Hidden => HIDDEN,
                        CardFace::Revealed | CardFace::Matched => i16::from(card.pair.raw()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        PyArray1::from_slice_bound(py, &values)
    }

    /// Card ids in board order.
    fn order(&self) -> Vec<u8> {
        self.game
            .session()
            .map(|s| s.board().iter().map(|c| c.id.raw()).collect())
            .unwrap_or_default()
    }

    /// Full renderer snapshot as JSON.
    fn snapshot_json(&self) -> PyResult<Option<String>> {
        self.game
            .snapshot()
            .map(|s| serde_json::to_string(&s).map_err(to_py_err))
            .transpose()
    }

    /// Current phase name.
    #[getter]
    fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }

    /// Completed comparisons.
    #[getter]
    fn move_count(&self) -> u32 {
        self.game.session().map_or(0, |s| s.move_count())
    }

    /// Timer units elapsed.
    #[getter]
    fn elapsed(&self) -> u64 {
        self.game.session().map_or(0, |s| s.elapsed())
    }

    /// Whether every pair has been found.
    #[getter]
    fn won(&self) -> bool {
        self.game.session().is_some_and(|s| s.is_won())
    }

    fn __repr__(&self) -> String {
        format!("MemoryGame(phase={}, moves={})", self.phase(), self.move_count())
    }
}
