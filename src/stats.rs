//! Round history
//!
//! Persisted as a pretty-printed JSON array, rewritten in full on every save.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::StatsError;

/// A finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Local time the round finished
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "secret_number", alias = "secret")]
    pub secret: i64,
    pub attempts: u32,
    pub won: bool,
    pub duration_seconds: u64,
    pub guesses: Vec<i64>,
    /// "min-max"
    #[serde(rename = "range")]
    pub range_label: String,
}

/// ISO-8601 local time with a six-digit fraction; any fraction is accepted on read
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Aggregate over the whole history
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub total_games: usize,
    pub wins: usize,
    /// 0.0 when there are no games
    pub win_rate_percent: f64,
    /// Fewest attempts among won rounds
    pub best_attempts: Option<u32>,
    pub average_duration_seconds: f64,
}

/// File-backed round history
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored round.
    ///
    /// A missing, unreadable or corrupt file yields an empty history.
    pub fn load(&self) -> Vec<RoundRecord> {
        match self.try_load() {
            Ok(records) => {
                log::debug!(
                    "Loaded {} rounds from {}",
                    records.len(),
                    self.path.display()
                );
                records
            }
            Err(StatsError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::debug!("No stats at {}, starting fresh", self.path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable stats: {}", e);
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<RoundRecord>, StatsError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Append one round and rewrite the whole file.
    ///
    /// The new contents go to a temporary file in the same directory which
    /// then replaces the stats file, so an interrupted save leaves the old
    /// history intact.
    pub fn append(&self, record: RoundRecord) -> Result<Vec<RoundRecord>, StatsError> {
        let mut records = self.load();
        records.push(record);

        let contents = serde_json::to_string_pretty(&records)?;
        self.replace_contents(&contents)?;
        log::info!(
            "Stats saved ({} rounds) to {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn replace_contents(&self, contents: &str) -> Result<(), StatsError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        tmp.write_all(contents.as_bytes())
            .map_err(|source| self.io_error(source))?;
        tmp.as_file()
            .sync_all()
            .map_err(|source| self.io_error(source))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StatsError {
        StatsError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Aggregate a loaded history
    pub fn summary(records: &[RoundRecord]) -> StatsSummary {
        let total_games = records.len();
        let wins = records.iter().filter(|r| r.won).count();
        let (win_rate_percent, average_duration_seconds) = if total_games == 0 {
            (0.0, 0.0)
        } else {
            let total_duration: u64 = records.iter().map(|r| r.duration_seconds).sum();
            (
                100.0 * wins as f64 / total_games as f64,
                total_duration as f64 / total_games as f64,
            )
        };
        let best_attempts = records.iter().filter(|r| r.won).map(|r| r.attempts).min();

        StatsSummary {
            total_games,
            wins,
            win_rate_percent,
            best_attempts,
            average_duration_seconds,
        }
    }
}
