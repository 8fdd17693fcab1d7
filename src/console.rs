//! Console prompts and messages
//!
//! Generic over the reader and writer so the whole game can be driven from
//! in-memory buffers.

use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::game::{GameSession, GuessOutcome, parse_guess};
use crate::settings::Settings;
use crate::stats::StatsSummary;

pub const FAREWELL: &str = "Thanks for playing! Goodbye!";
pub const INTERRUPT_FAREWELL: &str = "Game interrupted. Goodbye!";

const RULE_WIDTH: usize = 50;

/// Parse a replay answer; `None` for anything unrecognized
pub fn parse_replay_answer(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" | "да" | "д" => Some(true),
        "no" | "n" | "нет" | "н" => Some(false),
        _ => None,
    }
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer (used to inspect output in tests)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line; end of input counts as an interrupt.
    ///
    /// Bytes that are not UTF-8 are replaced, so such a line is rejected by
    /// the caller's parser instead of failing the read.
    fn read_line(&mut self) -> Result<String, AppError> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(AppError::Interrupted);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn prompt(&mut self, text: &str) -> Result<String, AppError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    fn rule(&mut self, ch: char) -> Result<(), AppError> {
        writeln!(self.output, "{}", ch.to_string().repeat(RULE_WIDTH))?;
        Ok(())
    }

    /// Ask for a guess until a valid in-range integer is entered
    pub fn prompt_guess(&mut self, session: &GameSession) -> Result<i64, AppError> {
        let settings = session.settings();
        let text = format!(
            "\nAttempt {}/{}. Your guess: ",
            session.attempts() + 1,
            settings.max_attempts
        );
        loop {
            let line = self.prompt(&text)?;
            match parse_guess(&line, settings.min, settings.max) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    log::debug!("Rejected input {:?}: {}", line.trim(), e);
                    writeln!(self.output, "Error: {}!", e)?;
                }
            }
        }
    }

    /// Ask whether to play again until the answer is recognized
    pub fn ask_replay(&mut self) -> Result<bool, AppError> {
        loop {
            let line = self.prompt("\nPlay again? (yes/no): ")?;
            match parse_replay_answer(&line) {
                Some(answer) => return Ok(answer),
                None => writeln!(self.output, "Please answer 'yes' or 'no'")?,
            }
        }
    }

    pub fn title(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{}", "=".repeat(60))?;
        writeln!(self.output, "{:^60}", "GUESS THE NUMBER")?;
        writeln!(self.output, "{}", "=".repeat(60))?;
        Ok(())
    }

    pub fn welcome(&mut self, settings: &Settings) -> Result<(), AppError> {
        writeln!(self.output, "Welcome to 'Guess the Number'!")?;
        self.rule('=')?;
        writeln!(
            self.output,
            "I'm thinking of a number between {} and {}.",
            settings.min, settings.max
        )?;
        writeln!(
            self.output,
            "You have {} attempts to guess it!",
            settings.max_attempts
        )?;
        writeln!(
            self.output,
            "After each attempt I'll tell you whether the number is higher or lower."
        )?;
        self.rule('=')
    }

    pub fn new_game_banner(&mut self) -> Result<(), AppError> {
        writeln!(self.output)?;
        self.rule('=')?;
        writeln!(self.output, "{:^50}", "NEW GAME")?;
        self.rule('=')
    }

    /// Higher/lower feedback, plus the one-time hint and low-attempts warning
    pub fn feedback(
        &mut self,
        session: &GameSession,
        guess: i64,
        outcome: GuessOutcome,
    ) -> Result<(), AppError> {
        match outcome {
            GuessOutcome::TooLow => {
                writeln!(self.output, "The number is GREATER than {}", guess)?
            }
            GuessOutcome::TooHigh => writeln!(self.output, "The number is LESS than {}", guess)?,
            GuessOutcome::Win => return Ok(()),
        }
        if session.hint_due() {
            if let Some((lo, hi)) = session.hint_range() {
                writeln!(self.output, "Hint: the number is between {} and {}", lo, hi)?;
            }
        }
        if session.low_on_attempts() {
            writeln!(
                self.output,
                "Attempts left: {}",
                session.attempts_remaining()
            )?;
        }
        Ok(())
    }

    pub fn win(&mut self, secret: i64, attempts: u32) -> Result<(), AppError> {
        writeln!(
            self.output,
            "\nCongratulations! You guessed the number {}!",
            secret
        )?;
        writeln!(self.output, "Attempts used: {}", attempts)?;
        Ok(())
    }

    pub fn loss(&mut self, secret: i64, max_attempts: u32) -> Result<(), AppError> {
        writeln!(
            self.output,
            "\nSorry, you used all {} attempts.",
            max_attempts
        )?;
        writeln!(self.output, "The number was: {}", secret)?;
        Ok(())
    }

    pub fn save_warning(&mut self, error: &dyn std::fmt::Display) -> Result<(), AppError> {
        writeln!(self.output, "Warning: could not save stats: {}", error)?;
        Ok(())
    }

    pub fn summary(&mut self, summary: &StatsSummary) -> Result<(), AppError> {
        writeln!(self.output, "\nGame stats:")?;
        writeln!(self.output, "   Games played: {}", summary.total_games)?;
        writeln!(
            self.output,
            "   Wins: {} ({:.1}%)",
            summary.wins, summary.win_rate_percent
        )?;
        if let Some(best) = summary.best_attempts {
            writeln!(self.output, "   Best round: {} attempts", best)?;
        }
        writeln!(
            self.output,
            "   Average round: {:.0}s",
            summary.average_duration_seconds
        )?;
        Ok(())
    }

    pub fn farewell(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "\n{}", FAREWELL)?;
        Ok(())
    }
}
