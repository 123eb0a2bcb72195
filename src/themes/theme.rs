//! Symbols and themes.

use serde::{Deserialize, Serialize};

/// Number of distinct symbols a board uses.
pub const SYMBOLS_PER_BOARD: usize = 8;

/// An opaque visual identifier: a glyph such as an emoji, or an image
/// reference such as a data URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Wrap a glyph or image reference.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for data URLs and remote image links.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.0.starts_with("data:image/")
            || self.0.starts_with("http://")
            || self.0.starts_with("https://")
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A named symbol set used to skin a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Catalog key, e.g. `animals` or `custom-1718000000000`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short blurb shown next to built-in themes.
    #[serde(default)]
    pub description: String,
    /// Symbols in display order. Boards use the first eight.
    pub symbols: Vec<Symbol>,
    /// Gradient style identifier for the presentation layer.
    pub gradient: String,
    /// Whether the theme was created at runtime.
    #[serde(default)]
    pub is_custom: bool,
}

impl Theme {
    /// Build a built-in theme from glyphs.
    pub fn builtin(id: &str, name: &str, description: &str, glyphs: &[&str], gradient: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            symbols: glyphs.iter().map(|g| Symbol::from(*g)).collect(),
            gradient: gradient.to_string(),
            is_custom: false,
        }
    }

    /// Whether the theme has enough symbols to fill a board.
    #[must_use]
    pub fn can_fill_board(&self) -> bool {
        self.symbols.len() >= SYMBOLS_PER_BOARD
    }

    /// The symbols a board built from this theme will use.
    #[must_use]
    pub fn board_symbols(&self) -> &[Symbol] {
        &self.symbols[..self.symbols.len().min(SYMBOLS_PER_BOARD)]
    }
}
