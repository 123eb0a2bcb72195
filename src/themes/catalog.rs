//! Theme catalog: built-in themes plus custom themes created at runtime.
//!
//! Lookup is total through `resolve`: an unknown id falls back to the
//! default built-in theme so board generation never fails on a stale id.

use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{MemoryError, Result, ThemePolicy};
use crate::storage::{Storage, ThemeStore};

use super::theme::{Symbol, Theme, SYMBOLS_PER_BOARD};

/// Theme used when a requested id is unknown.
pub const DEFAULT_THEME_ID: &str = "animals";

/// Gradient assigned to every custom theme.
pub const CUSTOM_THEME_GRADIENT: &str = "from-violet-600 to-green-600";

/// Image formats accepted for custom themes.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// The fixed built-in themes, default first.
#[must_use]
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        Theme::builtin(
            "animals",
            "Animals",
            "Cute and friendly animals",
            &["🐶", "🐱", "🐰", "🦊", "🐻", "🐼", "🐸", "🐵"],
            "from-green-400 to-blue-500",
        ),
        Theme::builtin(
            "nature",
            "Nature",
            "Beautiful natural elements",
            &["🌸", "🌺", "🌻", "🌷", "🌹", "🌿", "🍀", "🌳"],
            "from-emerald-400 to-teal-500",
        ),
        Theme::builtin(
            "food",
            "Food",
            "Delicious treats and meals",
            &["🍎", "🍌", "🍇", "🍓", "🍒", "🥝", "🍑", "🥭"],
            "from-orange-400 to-pink-500",
        ),
        Theme::builtin(
            "space",
            "Space",
            "Cosmic wonders and planets",
            &["🌟", "⭐", "🌙", "☀️", "🪐", "🚀", "🛸", "👽"],
            "from-purple-400 to-indigo-600",
        ),
        Theme::builtin(
            "ocean",
            "Ocean",
            "Marine life and sea creatures",
            &["🐠", "🐟", "🦈", "🐙", "🦀", "🐚", "🌊", "🏝️"],
            "from-blue-400 to-cyan-500",
        ),
        Theme::builtin(
            "transport",
            "Transport",
            "Vehicles and transportation",
            &["🚗", "🚲", "✈️", "🚢", "🚂", "🏍️", "🚁", "🚀"],
            "from-red-400 to-yellow-500",
        ),
    ]
}

/// One image offered for a custom theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Original file name, used in validation messages.
    pub name: String,
    /// MIME type reported by the uploader.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Where the image now lives (data URL or storage link).
    pub reference: String,
}

impl ImageUpload {
    /// Check type and size against the policy.
    pub fn validate(&self, policy: &ThemePolicy) -> Result<()> {
        if !ACCEPTED_IMAGE_TYPES.contains(&self.mime_type.as_str()) {
            return Err(MemoryError::InvalidUpload {
                name: self.name.clone(),
                reason: "Only PNG, JPG, and WEBP files are allowed".to_string(),
            });
        }
        if self.size_bytes > policy.max_image_bytes {
            return Err(MemoryError::InvalidUpload {
                name: self.name.clone(),
                reason: format!("File size must be at most {} bytes", policy.max_image_bytes),
            });
        }
        Ok(())
    }
}

/// All themes known to the process.
#[derive(Clone, Debug)]
pub struct ThemeCatalog {
    /// Built-ins first (default at index 0), then custom themes in creation order.
    themes: Vec<Theme>,
    index: FxHashMap<String, usize>,
    policy: ThemePolicy,
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::new(ThemePolicy::default())
    }
}

impl ThemeCatalog {
    /// Create a catalog holding only the built-in themes.
    #[must_use]
    pub fn new(policy: ThemePolicy) -> Self {
        let mut catalog = Self {
            themes: Vec::new(),
            index: FxHashMap::default(),
            policy,
        };
        for theme in builtin_themes() {
            catalog.insert(theme);
        }
        catalog
    }

    fn insert(&mut self, theme: Theme) -> bool {
        if self.index.contains_key(&theme.id) {
            return false;
        }
        self.index.insert(theme.id.clone(), self.themes.len());
        self.themes.push(theme);
        true
    }

    /// The active custom theme policy.
    #[must_use]
    pub fn policy(&self) -> &ThemePolicy {
        &self.policy
    }

    /// Look up a theme by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.index.get(id).map(|&i| &self.themes[i])
    }

    /// Look up a theme by id, failing when it is unknown.
    pub fn require(&self, id: &str) -> Result<&Theme> {
        self.get(id)
            .ok_or_else(|| MemoryError::ThemeNotFound(id.to_string()))
    }

    /// Look up a theme by id, falling back to the default theme.
    #[must_use]
    pub fn resolve(&self, id: &str) -> &Theme {
        match self.get(id) {
            Some(theme) => theme,
            None => {
                warn!("Unknown theme '{}', falling back to '{}'", id, DEFAULT_THEME_ID);
                self.default_theme()
            }
        }
    }

    /// The default built-in theme.
    #[must_use]
    pub fn default_theme(&self) -> &Theme {
        &self.themes[0]
    }

    /// All themes, built-ins first.
    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    /// Custom themes only.
    pub fn custom_themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter().filter(|t| t.is_custom)
    }

    /// Number of known themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the catalog is empty. Never true: built-ins are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Load previously created custom themes from storage.
    ///
    /// Themes whose id is already known are skipped. Returns how many were added.
    pub fn load_custom<S: Storage>(&mut self, store: &ThemeStore<S>) -> Result<usize> {
        let mut added = 0;
        for mut theme in store.load()? {
            theme.is_custom = true;
            if self.insert(theme) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Validate uploads, build a custom theme, persist it, and register it.
    ///
    /// Nothing is registered when persisting fails.
    pub fn create_custom<S: Storage>(
        &mut self,
        name: &str,
        uploads: &[ImageUpload],
        store: &mut ThemeStore<S>,
    ) -> Result<Theme> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MemoryError::InvalidThemeName);
        }
        if uploads.len() < self.policy.min_symbols.max(SYMBOLS_PER_BOARD) {
            return Err(MemoryError::InsufficientSymbols {
                theme: name.to_string(),
                found: uploads.len(),
                required: self.policy.min_symbols.max(SYMBOLS_PER_BOARD),
            });
        }
        if uploads.len() > self.policy.max_symbols {
            return Err(MemoryError::TooManySymbols {
                found: uploads.len(),
                max: self.policy.max_symbols,
            });
        }
        for upload in uploads {
            upload.validate(&self.policy)?;
        }

        let theme = Theme {
            id: self.fresh_custom_id(),
            name: name.to_string(),
            description: String::new(),
            symbols: uploads.iter().map(|u| Symbol::new(u.reference.clone())).collect(),
            gradient: CUSTOM_THEME_GRADIENT.to_string(),
            is_custom: true,
        };

        store.append(&theme)?;
        info!("Created custom theme '{}' ({} images)", theme.id, theme.symbols.len());
        self.insert(theme.clone());
        Ok(theme)
    }

    fn fresh_custom_id(&self) -> String {
        let mut stamp = chrono::Utc::now().timestamp_millis();
        loop {
            let id = format!("custom-{stamp}");
            if !self.index.contains_key(&id) {
                return id;
            }
            stamp += 1;
        }
    }
}
