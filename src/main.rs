//! Guess Number entry point
//!
//! Sets up logging and the Ctrl-C handler, then runs the game on stdin/stdout.

use std::io;
use std::process::ExitCode;

use guess_number::console::{Console, INTERRUPT_FAREWELL};
use guess_number::{AppError, GuessNumberApp, Settings};

fn run() -> Result<(), AppError> {
    let mut app = GuessNumberApp::new(Settings::default())?;
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    app.run(&mut console)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Guess Number starting...");

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\n\n{}", INTERRUPT_FAREWELL);
        std::process::exit(0);
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Interrupted) => {
            println!("\n\n{}", INTERRUPT_FAREWELL);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nUnexpected error: {}", e);
            ExitCode::FAILURE
        }
    }
}
