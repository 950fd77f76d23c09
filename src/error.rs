use crate::code::Code;
use thiserror::Error;

/// Everything that can go wrong while setting up or playing a round.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("code length {actual} does not match the configured length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("no candidate code is consistent with the feedback so far")]
    NoConsistentCandidate,
    #[error("secret {0} breaks the rules of this game")]
    InvalidSecret(Code),
    #[error("the round is already over")]
    RoundOver,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("input closed before the game finished")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
