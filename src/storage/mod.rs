//! Persistence port.
//!
//! The game never touches a concrete store. Hosts inject a `Storage`
//! implementation (browser local storage, a file, a database row); tests
//! use `MemoryStorage`. Values are JSON documents holding whole lists:
//! reading an absent key yields an empty list, writing replaces the list.
//!
//! - `ScoreBook`: completed-game records, global and per-player views
//! - `ThemeStore`: custom themes

pub mod memory;
pub mod scores;
pub mod themes;

pub use memory::MemoryStorage;
pub use scores::{RankedScore, ScoreBook, DEFAULT_LEADERBOARD_SIZE, SCORES_KEY};
pub use themes::{ThemeStore, CUSTOM_THEMES_KEY};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::Result;

/// Named-record storage.
///
/// Failures are reported as `MemoryError::Persistence`.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&mut self, key: &str, value: String) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: String) -> Result<()> {
        (**self).write(key, value)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: String) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Decode the list stored under `key`. Absent keys read as empty.
pub(crate) fn read_list<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Result<Vec<T>> {
    match storage.read(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Read the list under `key`, push `item`, write it back.
pub(crate) fn append_to_list<T: Serialize + DeserializeOwned + Clone>(
    storage: &mut impl Storage,
    key: &str,
    item: &T,
) -> Result<()> {
    let mut items: Vec<T> = read_list(&*storage, key)?;
    items.push(item.clone());
    storage.write(key, serde_json::to_string(&items)?)
}
