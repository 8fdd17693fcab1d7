//! Guess parsing and per-guess outcomes

use crate::error::GuessError;

/// Result of comparing one guess against the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Guess equals the secret
    Win,
    /// Secret is greater than the guess
    TooLow,
    /// Secret is less than the guess
    TooHigh,
}

impl GuessOutcome {
    /// Compare `guess` against `secret`
    pub fn of(guess: i64, secret: i64) -> Self {
        use std::cmp::Ordering;
        match guess.cmp(&secret) {
            Ordering::Equal => GuessOutcome::Win,
            Ordering::Less => GuessOutcome::TooLow,
            Ordering::Greater => GuessOutcome::TooHigh,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, GuessOutcome::Win)
    }
}

/// Parse one line of player input into a guess within `[min, max]`.
///
/// Surrounding whitespace is ignored. Empty or non-integer input is
/// `InvalidInput`; an integer outside the range is `OutOfRange`.
pub fn parse_guess(raw: &str, min: i64, max: i64) -> Result<i64, GuessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GuessError::InvalidInput);
    }
    let value: i64 = trimmed.parse().map_err(|_| GuessError::InvalidInput)?;
    if value < min || value > max {
        return Err(GuessError::OutOfRange { value, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_of() {
        assert_eq!(GuessOutcome::of(42, 42), GuessOutcome::Win);
        assert_eq!(GuessOutcome::of(41, 42), GuessOutcome::TooLow);
        assert_eq!(GuessOutcome::of(43, 42), GuessOutcome::TooHigh);
        assert!(GuessOutcome::Win.is_win());
        assert!(!GuessOutcome::TooHigh.is_win());
    }

    #[test]
    fn test_parse_guess_accepts_trimmed_integers() {
        assert_eq!(parse_guess("42", 1, 100), Ok(42));
        assert_eq!(parse_guess("  7 \n", 1, 100), Ok(7));
        assert_eq!(parse_guess("+15", 1, 100), Ok(15));
        assert_eq!(parse_guess("1", 1, 100), Ok(1));
        assert_eq!(parse_guess("100", 1, 100), Ok(100));
    }

    #[test]
    fn test_parse_guess_invalid_input() {
        assert_eq!(parse_guess("", 1, 100), Err(GuessError::InvalidInput));
        assert_eq!(parse_guess("   \n", 1, 100), Err(GuessError::InvalidInput));
        assert_eq!(parse_guess("abc", 1, 100), Err(GuessError::InvalidInput));
        assert_eq!(parse_guess("4.5", 1, 100), Err(GuessError::InvalidInput));
        assert_eq!(parse_guess("1 2", 1, 100), Err(GuessError::InvalidInput));
    }

    #[test]
    fn test_parse_guess_out_of_range() {
        assert_eq!(
            parse_guess("0", 1, 100),
            Err(GuessError::OutOfRange {
                value: 0,
                min: 1,
                max: 100
            })
        );
        assert_eq!(
            parse_guess("101", 1, 100),
            Err(GuessError::OutOfRange {
                value: 101,
                min: 1,
                max: 100
            })
        );
        assert!(matches!(
            parse_guess("-3", 1, 100),
            Err(GuessError::OutOfRange { value: -3, .. })
        ));
    }
}
