//! Engine configuration types.
//!
//! Frontends configure the engine at startup by providing:
//! - `ImageCatalog`: The ordered image pairs boards are dealt from
//! - `ScoringRules`: Point values used by `compute_score`
//! - `EngineConfig`: Combines all configuration plus timing constants
//!
//! Difficulty tiers are fixed; only the catalog and timings are
//! configurable.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::ImageCatalog;

/// One of the three fixed difficulty configurations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    /// All tiers, in selector order.
    pub const ALL: [DifficultyTier; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Board size and time limit for this tier.
    #[must_use]
    pub const fn settings(self) -> TierSettings {
        match self {
            DifficultyTier::Easy => TierSettings {
                pair_count: 6,
                time_limit_secs: 60,
            },
            DifficultyTier::Medium => TierSettings {
                pair_count: 8,
                time_limit_secs: 90,
            },
            DifficultyTier::Hard => TierSettings {
                pair_count: 12,
                time_limit_secs: 120,
            },
        }
    }

    /// Lowercase name, also the score-table key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard" => Ok(DifficultyTier::Hard),
            _ => Err(ConfigError::UnknownTier(s.to_string())),
        }
    }
}

/// Fixed `(pair_count, time_limit)` for a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierSettings {
    /// Number of image pairs on the board (board has twice as many cards).
    pub pair_count: usize,
    /// Countdown length in seconds.
    pub time_limit_secs: u32,
}

impl TierSettings {
    /// Number of cards on the board.
    #[must_use]
    pub const fn card_count(self) -> usize {
        self.pair_count * 2
    }
}

/// Point values for the end-of-game score.
///
/// `score = max(0, pairs * pair_points + seconds * second_points - moves * move_penalty)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub pair_points: u32,
    pub second_points: u32,
    pub move_penalty: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            pair_points: 100,
            second_points: 10,
            move_penalty: 5,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Image pairs boards are dealt from, in order.
    pub catalog: ImageCatalog,

    /// How long a mismatched pair stays face-up before the re-hide.
    pub reveal_delay: Duration,

    /// Length of one countdown step.
    pub tick_interval: Duration,

    /// Score formula constants.
    pub scoring: ScoringRules,

    /// Entries kept per tier in the high-score table.
    pub high_score_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: ImageCatalog::default(),
            reveal_delay: Duration::from_millis(1000),
            tick_interval: Duration::from_secs(1),
            scoring: ScoringRules::default(),
            high_score_limit: 5,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the image catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: ImageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the mismatch reveal delay.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Set the countdown step length.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the scoring constants.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set how many high scores are kept per tier.
    #[must_use]
    pub fn with_high_score_limit(mut self, limit: usize) -> Self {
        self.high_score_limit = limit;
        self
    }

    /// Check that every tier can be dealt from the catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for tier in DifficultyTier::ALL {
            self.check_tier(tier)?;
        }
        Ok(())
    }

    /// Check a single tier against the catalog.
    pub fn check_tier(&self, tier: DifficultyTier) -> Result<(), ConfigError> {
        let requested = tier.settings().pair_count;
        let available = self.catalog.len();
        if requested > available {
            return Err(ConfigError::CatalogTooSmall {
                tier,
                requested,
                available,
            });
        }
        Ok(())
    }
}
