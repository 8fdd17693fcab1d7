//! Driver loop
//!
//! Plays rounds until the player declines a replay, saving every finished
//! round and showing the aggregate stats after each one.

use std::io::{BufRead, Write};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::console::Console;
use crate::error::{AppError, GameError};
use crate::game::{GamePhase, GameSession};
use crate::settings::Settings;
use crate::stats::{RoundRecord, StatsStore};

pub struct GuessNumberApp {
    session: GameSession,
    store: StatsStore,
    rng: Pcg32,
}

impl GuessNumberApp {
    /// App with a randomly seeded RNG
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        Self::with_seed(settings, rand::random())
    }

    /// App whose secrets are reproducible from `seed`
    pub fn with_seed(settings: Settings, seed: u64) -> Result<Self, GameError> {
        let store = StatsStore::new(settings.stats_path.clone());
        let session = GameSession::new(settings)?;
        log::debug!("RNG seed: {}", seed);
        Ok(Self {
            session,
            store,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Play one round to completion and return its record
    pub fn play_round<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<RoundRecord, AppError> {
        self.session.start(&mut self.rng);
        console.welcome(self.session.settings())?;

        while self.session.phase() == GamePhase::InProgress {
            let guess = console.prompt_guess(&self.session)?;
            let outcome = self.session.submit_guess(guess)?;
            console.feedback(&self.session, guess, outcome)?;
        }

        let record = self
            .session
            .finish_record()
            .ok_or(GameError::NotInProgress)?;
        if record.won {
            console.win(record.secret, record.attempts)?;
        } else {
            console.loss(record.secret, self.session.settings().max_attempts)?;
        }
        log::info!(
            "Round finished: won={} attempts={} duration={}s",
            record.won,
            record.attempts,
            record.duration_seconds
        );
        Ok(record)
    }

    /// Save a finished round, then show the stats if there is any history
    fn record_round<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        record: RoundRecord,
    ) -> Result<(), AppError> {
        let history = match self.store.append(record) {
            Ok(history) => history,
            Err(e) => {
                log::warn!("Saving stats failed: {}", e);
                console.save_warning(&e)?;
                self.store.load()
            }
        };
        if !history.is_empty() {
            console.summary(&StatsStore::summary(&history))?;
        }
        Ok(())
    }

    /// Play rounds until the player says no
    pub fn run<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<(), AppError> {
        console.title()?;
        loop {
            let record = self.play_round(console)?;
            self.record_round(console, record)?;

            if !console.ask_replay()? {
                console.farewell()?;
                return Ok(());
            }
            console.new_game_banner()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Cursor;

    fn secrets(seed: u64, settings: &Settings, n: usize) -> Vec<i64> {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..n)
            .map(|_| rng.random_range(settings.min..=settings.max))
            .collect()
    }

    fn miss(secret: i64) -> i64 {
        if secret == 1 { 2 } else { 1 }
    }

    fn run_game(settings: Settings, seed: u64, input: &str) -> (Result<(), AppError>, String) {
        let mut app = GuessNumberApp::with_seed(settings, seed).unwrap();
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = app.run(&mut console);
        (result, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        assert!(GuessNumberApp::new(Settings::new(3, 1, 10)).is_err());
    }

    #[test]
    fn test_win_round_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default().with_stats_path(dir.path().join("stats.json"));
        let secret = secrets(7, &settings, 1)[0];

        let input = format!("abc\n\n{}\n{}\nno\n", miss(secret), secret);
        let (result, out) = run_game(settings.clone(), 7, &input);
        assert!(result.is_ok());
        assert!(out.contains(&format!("You guessed the number {}!", secret)));
        assert!(out.contains("Attempts used: 2"));
        assert!(out.contains("Games played: 1"));
        assert!(out.contains("Wins: 1 (100.0%)"));
        assert!(out.contains("Thanks for playing!"));

        let history = StatsStore::new(&settings.stats_path).load();
        assert_eq!(history.len(), 1);
        assert!(history[0].won);
        assert_eq!(history[0].attempts, 2);
        assert_eq!(history[0].guesses, vec![miss(secret), secret]);
        assert_eq!(history[0].range_label, "1-100");
    }

    #[test]
    fn test_exhausted_round_reveals_secret() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(1, 100, 2).with_stats_path(dir.path().join("stats.json"));
        let secret = secrets(11, &settings, 1)[0];

        let input = format!("{0}\n{0}\nn\n", miss(secret));
        let (result, out) = run_game(settings.clone(), 11, &input);
        assert!(result.is_ok());
        assert!(out.contains("you used all 2 attempts"));
        assert!(out.contains(&format!("The number was: {}", secret)));
        assert!(out.contains("Wins: 0 (0.0%)"));

        let history = StatsStore::new(&settings.stats_path).load();
        assert_eq!(history.len(), 1);
        assert!(!history[0].won);
        assert_eq!(history[0].attempts, 2);
    }

    #[test]
    fn test_replay_plays_another_round() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(1, 100, 1).with_stats_path(dir.path().join("stats.json"));
        let s = secrets(3, &settings, 2);

        let input = format!("{}\nhuh\nyes\n{}\nнет\n", s[0], miss(s[1]));
        let (result, out) = run_game(settings.clone(), 3, &input);
        assert!(result.is_ok());
        assert!(out.contains("NEW GAME"));
        assert!(out.contains("Please answer 'yes' or 'no'"));
        assert!(out.contains("Games played: 2"));
        assert!(out.contains("Wins: 1 (50.0%)"));

        let history = StatsStore::new(&settings.stats_path).load();
        assert_eq!(history.iter().map(|r| r.won).collect::<Vec<_>>(), vec![true, false]);
    }

    #[test]
    fn test_non_utf8_guess_is_reprompted() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(1, 100, 1).with_stats_path(dir.path().join("stats.json"));
        let secret = secrets(9, &settings, 1)[0];

        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(format!("{}\nno\n", secret).as_bytes());
        let mut app = GuessNumberApp::with_seed(settings.clone(), 9).unwrap();
        let mut console = Console::new(Cursor::new(input), Vec::new());
        assert!(app.run(&mut console).is_ok());

        let history = StatsStore::new(&settings.stats_path).load();
        assert_eq!(history.len(), 1);
        assert!(history[0].won);
        assert_eq!(history[0].attempts, 1);
    }

    #[test]
    fn test_save_failure_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new(1, 100, 1)
            .with_stats_path(dir.path().join("no_such_dir").join("stats.json"));
        let secret = secrets(5, &settings, 1)[0];

        let input = format!("{}\nno\n", secret);
        let (result, out) = run_game(settings, 5, &input);
        assert!(result.is_ok());
        assert!(out.contains("Warning: could not save stats"));
        assert!(!out.contains("Games played"));
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn test_end_of_input_interrupts() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default().with_stats_path(dir.path().join("stats.json"));
        let (result, _) = run_game(settings.clone(), 1, "abc\n");
        assert!(matches!(result, Err(AppError::Interrupted)));
        assert!(StatsStore::new(&settings.stats_path).load().is_empty());
    }
}
