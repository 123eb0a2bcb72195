//! Python bindings for the memory-match game core.
//!
//! # Quick Start
//!
//! ```python
//! import memory_match as mm
//!
//! game = mm.MemoryGame(theme_id="space", seed=42)
//! game.flip(0)
//! game.flip(1)
//! events = game.advance(1000)   # list of JSON-encoded events
//!
//! obs = game.observation()      # numpy int16 array, one entry per position
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// memory-match: a themed memory card game core.
#[pymodule]
fn memory_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMemoryGame>()?;
    m.add_function(wrap_pyfunction!(theme_ids, m)?)?;
    Ok(())
}
