//! Session configuration.
//!
//! Difficulty and theme-policy knobs that the source game shipped in
//! several inconsistent variants are explicit options here:
//! - `ReshufflePolicy`: when unmatched cards get repositioned
//! - `ThemePolicy`: how many symbols a custom theme may carry
//! - delays: settle time before a comparison resolves, reshuffle animation
//!   time, and the timer tick interval

use serde::{Deserialize, Serialize};

use super::error::Result;

/// When the engine repositions unmatched cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReshufflePolicy {
    /// Never reshuffle.
    Never,
    /// Reshuffle once this many misses happen in a row.
    AfterConsecutiveMisses(u32),
    /// Reshuffle after every resolved comparison, hit or miss.
    EveryMove,
}

impl Default for ReshufflePolicy {
    fn default() -> Self {
        Self::AfterConsecutiveMisses(3)
    }
}

/// Bounds on the number of symbols a custom theme may supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePolicy {
    /// Minimum symbols (a board needs 8 pairs).
    pub min_symbols: usize,
    /// Maximum symbols accepted from an upload.
    pub max_symbols: usize,
    /// Maximum size of a single uploaded image, in bytes.
    pub max_image_bytes: u64,
}

impl ThemePolicy {
    /// Accepts 8 to 18 images.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            min_symbols: 8,
            max_symbols: 18,
            max_image_bytes: 2 * 1024 * 1024,
        }
    }

    /// Accepts 8 to 16 images.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_symbols: 16,
            ..Self::lenient()
        }
    }
}

impl Default for ThemePolicy {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Configuration for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Reshuffle rule for unmatched cards.
    pub reshuffle: ReshufflePolicy,

    /// Delay between the second flip and the comparison result (ms).
    /// Lets a player see both faces.
    pub settle_delay_ms: u64,

    /// Delay on each side of a reshuffle (ms): once before the cards move,
    /// once before input unlocks again.
    pub reshuffle_delay_ms: u64,

    /// Real time per elapsed-time unit (ms).
    pub tick_interval_ms: u64,

    /// RNG seed. `None` draws a fresh seed per engine.
    pub seed: Option<u64>,

    /// Custom theme limits.
    pub theme_policy: ThemePolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            reshuffle: ReshufflePolicy::default(),
            settle_delay_ms: 1000,
            reshuffle_delay_ms: 300,
            tick_interval_ms: 1000,
            seed: None,
            theme_policy: ThemePolicy::default(),
        }
    }
}

impl MatchConfig {
    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the reshuffle policy.
    #[must_use]
    pub fn with_reshuffle(mut self, policy: ReshufflePolicy) -> Self {
        self.reshuffle = policy;
        self
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Set the reshuffle animation delay.
    #[must_use]
    pub fn with_reshuffle_delay_ms(mut self, ms: u64) -> Self {
        self.reshuffle_delay_ms = ms;
        self
    }

    /// Set the timer tick interval. Zero is clamped to 1 ms.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms.max(1);
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the custom theme policy.
    #[must_use]
    pub fn with_theme_policy(mut self, policy: ThemePolicy) -> Self {
        self.theme_policy = policy;
        self
    }
}
