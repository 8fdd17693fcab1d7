//! Game session module
//!
//! All round logic lives here. No console or file I/O:
//! - Secret chosen from a caller-supplied RNG
//! - Guesses validated and compared
//! - Termination on win or exhausted attempts

pub mod guess;
pub mod state;

pub use guess::{GuessOutcome, parse_guess};
pub use state::{GamePhase, GameSession};
