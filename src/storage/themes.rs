//! Custom theme persistence.

use crate::core::Result;
use crate::themes::Theme;

use super::{append_to_list, read_list, Storage};

/// Storage key for the custom theme list.
pub const CUSTOM_THEMES_KEY: &str = "customThemes";

/// Append-only list of custom themes.
#[derive(Clone, Debug, Default)]
pub struct ThemeStore<S> {
    storage: S,
}

impl<S: Storage> ThemeStore<S> {
    /// Wrap a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// All stored custom themes, oldest first.
    pub fn load(&self) -> Result<Vec<Theme>> {
        read_list(&self.storage, CUSTOM_THEMES_KEY)
    }

    /// Persist one more theme.
    pub fn append(&mut self, theme: &Theme) -> Result<()> {
        append_to_list(&mut self.storage, CUSTOM_THEMES_KEY, theme)
    }

    /// Give back the storage backend.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
