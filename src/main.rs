use log::error;
use mastermind::cli::parse_cli;
use mastermind::logging::init_logging;
use mastermind::{GameError, run_session};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();
    let cli = parse_cli();
    let rules = match cli.config() {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    match run_session(&mut stdin.lock(), rules, &mut rng) {
        Ok(_) => ExitCode::SUCCESS,
        Err(GameError::InputClosed) => {
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("session aborted: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
