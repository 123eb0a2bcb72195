//! Theme catalog: symbol sets used to skin boards.
//!
//! - `Theme` / `Symbol`: the data
//! - `ThemeCatalog`: built-in themes, custom theme creation, lookup with
//!   fallback to the default theme

pub mod theme;
pub mod catalog;

pub use theme::{Symbol, Theme, SYMBOLS_PER_BOARD};
pub use catalog::{
    builtin_themes, ImageUpload, ThemeCatalog, ACCEPTED_IMAGE_TYPES, CUSTOM_THEME_GRADIENT,
    DEFAULT_THEME_ID,
};
