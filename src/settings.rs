//! Game settings
//!
//! Baked into the entry point via `Settings::default()`; nothing is read from
//! the command line or the environment.

use std::path::PathBuf;

use crate::consts::*;
use crate::error::GameError;

/// Round configuration and stats location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    // === Range ===
    /// Smallest possible secret (inclusive)
    pub min: i64,
    /// Largest possible secret (inclusive)
    pub max: i64,

    // === Rules ===
    /// Attempts allowed per round
    pub max_attempts: u32,

    // === Persistence ===
    /// File the round history is read from and written to
    pub stats_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            stats_path: PathBuf::from(STATS_FILE_NAME),
        }
    }
}

impl Settings {
    /// Settings with a custom range and attempt budget, default stats file
    pub fn new(min: i64, max: i64, max_attempts: u32) -> Self {
        Self {
            min,
            max,
            max_attempts,
            ..Self::default()
        }
    }

    /// Same settings, different stats file
    pub fn with_stats_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stats_path = path.into();
        self
    }

    /// Reject an empty range or a zero attempt budget
    pub fn validate(&self) -> Result<(), GameError> {
        if self.min >= self.max {
            return Err(GameError::InvalidSettings(format!(
                "min ({}) must be less than max ({})",
                self.min, self.max
            )));
        }
        if self.max_attempts == 0 {
            return Err(GameError::InvalidSettings(
                "max_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `value` lies in `[min, max]`
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// "min-max", as stored in round records
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}
