//! Round state and the guess/feedback/termination rules
//!
//! A session moves `NotStarted -> InProgress -> {Won, Exhausted}`. Calling
//! `start` again begins a fresh round from any phase.

use std::time::Instant;

use chrono::{Local, SubsecRound};
use rand::Rng;

use super::guess::GuessOutcome;
use crate::consts::*;
use crate::error::{GameError, GuessError};
use crate::settings::Settings;
use crate::stats::RoundRecord;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No secret chosen yet
    NotStarted,
    /// Accepting guesses
    InProgress,
    /// The secret was guessed
    Won,
    /// Every attempt used without a win
    Exhausted,
}

impl GamePhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Exhausted)
    }
}

/// One round of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    secret: Option<i64>,
    attempts: u32,
    /// One entry per accepted guess, in order
    guesses: Vec<i64>,
    started_at: Option<Instant>,
    phase: GamePhase,
}

impl GameSession {
    /// Create an unstarted session; fails on an empty range or zero attempts
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        Ok(Self {
            settings,
            secret: None,
            attempts: 0,
            guesses: Vec::new(),
            started_at: None,
            phase: GamePhase::NotStarted,
        })
    }

    /// Pick a secret uniformly from `[min, max]` and reset the round
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let secret = rng.random_range(self.settings.min..=self.settings.max);
        self.begin(secret);
    }

    /// Start a round with a known secret
    pub fn start_with_secret(&mut self, secret: i64) -> Result<(), GameError> {
        if !self.settings.contains(secret) {
            return Err(GuessError::OutOfRange {
                value: secret,
                min: self.settings.min,
                max: self.settings.max,
            }
            .into());
        }
        self.begin(secret);
        Ok(())
    }

    fn begin(&mut self, secret: i64) {
        self.secret = Some(secret);
        self.attempts = 0;
        self.guesses.clear();
        self.started_at = Some(Instant::now());
        self.phase = GamePhase::InProgress;
        log::info!(
            "Round started: range {}, {} attempts",
            self.settings.range_label(),
            self.settings.max_attempts
        );
    }

    /// Record a guess and compare it against the secret.
    ///
    /// Only in-range guesses during `InProgress` are accepted; a rejected
    /// guess leaves the session untouched.
    pub fn submit_guess(&mut self, value: i64) -> Result<GuessOutcome, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::NotInProgress);
        }
        let secret = self.secret.ok_or(GameError::NotInProgress)?;
        if !self.settings.contains(value) {
            return Err(GuessError::OutOfRange {
                value,
                min: self.settings.min,
                max: self.settings.max,
            }
            .into());
        }

        self.attempts += 1;
        self.guesses.push(value);

        let outcome = GuessOutcome::of(value, secret);
        if outcome.is_win() {
            self.phase = GamePhase::Won;
        } else if self.attempts >= self.settings.max_attempts {
            self.phase = GamePhase::Exhausted;
        }
        log::debug!(
            "Guess {} -> {:?} (attempt {}/{})",
            value,
            outcome,
            self.attempts,
            self.settings.max_attempts
        );
        Ok(outcome)
    }

    /// Window of at most `2 * HINT_RADIUS` around the secret, clipped to the range
    pub fn hint_range(&self) -> Option<(i64, i64)> {
        self.secret.map(|secret| {
            (
                secret.saturating_sub(HINT_RADIUS).max(self.settings.min),
                secret.saturating_add(HINT_RADIUS).min(self.settings.max),
            )
        })
    }

    /// True right after the `HINT_ATTEMPT`-th guess of a round that was not won
    pub fn hint_due(&self) -> bool {
        self.attempts == HINT_ATTEMPT
            && matches!(self.phase, GamePhase::InProgress | GamePhase::Exhausted)
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.settings.max_attempts.saturating_sub(self.attempts)
    }

    /// Whether the player should be warned about running out of attempts
    pub fn low_on_attempts(&self) -> bool {
        self.phase != GamePhase::Won
            && self.phase != GamePhase::NotStarted
            && self.attempts_remaining() <= LOW_ATTEMPTS_WARNING
    }

    /// The secret, once the round is over
    pub fn revealed_secret(&self) -> Option<i64> {
        if self.phase.is_finished() {
            self.secret
        } else {
            None
        }
    }

    /// Summary of a finished round, timestamped now
    pub fn finish_record(&self) -> Option<RoundRecord> {
        let secret = self.revealed_secret()?;
        let duration_seconds = self
            .started_at
            .map(|started| started.elapsed().as_secs())
            .unwrap_or(0);
        Some(RoundRecord {
            timestamp: Local::now().naive_local().trunc_subsecs(6),
            secret,
            attempts: self.attempts,
            won: self.phase == GamePhase::Won,
            duration_seconds,
            guesses: self.guesses.clone(),
            range_label: self.settings.range_label(),
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn guesses(&self) -> &[i64] {
        &self.guesses
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
