//! Error types for the game.

use thiserror::Error;

/// A rejected line of player input. Always recovered at the prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// Empty input or not an integer
    #[error("please enter a whole number")]
    InvalidInput,

    /// An integer outside the configured range
    #[error("{value} is out of range, the number must be between {min} and {max}")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// Errors raised by a game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A guess was submitted before `start` or after the round ended
    #[error("no round in progress")]
    NotInProgress,

    #[error(transparent)]
    Guess(#[from] GuessError),
}

/// Stats file I/O and encoding failures.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that end the driver loop.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input closed or the player interrupted the game
    #[error("game interrupted")]
    Interrupted,

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}
