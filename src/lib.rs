//! Guess Number - a console number-guessing game
//!
//! Core modules:
//! - `game`: Round state machine (secret, attempts, feedback, hint window)
//! - `stats`: Persisted round history and aggregate win rate
//! - `settings`: Range, attempt budget and stats file location
//! - `console`: Prompting and message output over any reader/writer
//! - `app`: Driver loop tying a session, the console and the stats store together

pub mod app;
pub mod console;
pub mod error;
pub mod game;
pub mod settings;
pub mod stats;

pub use app::GuessNumberApp;
pub use error::{AppError, GameError, GuessError, StatsError};
pub use game::{GamePhase, GameSession, GuessOutcome};
pub use settings::Settings;
pub use stats::{RoundRecord, StatsStore, StatsSummary};

/// Game configuration constants
pub mod consts {
    /// Default smallest secret (inclusive)
    pub const DEFAULT_MIN: i64 = 1;
    /// Default largest secret (inclusive)
    pub const DEFAULT_MAX: i64 = 100;
    /// Default attempt budget per round
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    /// Stats file name, relative to the working directory
    pub const STATS_FILE_NAME: &str = "game_stats.json";

    /// Half-width of the hint window around the secret
    pub const HINT_RADIUS: i64 = 20;
    /// The hint window is revealed on exactly this attempt
    pub const HINT_ATTEMPT: u32 = 3;
    /// Warn the player once this few attempts (or fewer) remain
    pub const LOW_ATTEMPTS_WARNING: u32 = 3;
}
