// Library interface for mastermind
// This allows integration tests to access internal modules

pub mod cli;
pub mod code;
pub mod config;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod scorer;
pub mod session;
pub mod solver;
pub mod validator;

// Re-export commonly used items for easier testing
pub use code::{Code, generate_secret};
pub use config::{Config, Rule};
pub use error::GameError;
pub use game_state::{
    FeedbackSink, GuessSource, Round, RoundOutcome, RoundState, TurnRecord, play_round,
};
pub use scorer::{Feedback, score};
pub use session::{GameRecord, run_session};
pub use solver::{CandidateSpace, ComputerGuesser};
pub use validator::{is_valid_guess, is_valid_secret};
