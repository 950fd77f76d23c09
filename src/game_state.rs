use crate::code::Code;
use crate::config::Config;
use crate::error::GameError;
use crate::scorer::{Feedback, score};
use crate::validator::{is_valid_guess, is_valid_secret};
use crate::{debug_log, info_log};

/// Anything that can come up with the next guess: a person at the keyboard or the solver.
pub trait GuessSource {
    /// Returns a guess for the coming turn. `previous` is the last scored turn, if any.
    fn next_guess(
        &mut self,
        config: &Config,
        previous: Option<&TurnRecord>,
    ) -> Result<Code, GameError>;
}

/// Receives the progress of a round for display. Nothing it does feeds back into play.
pub trait FeedbackSink {
    fn turn_scored(&mut self, turn: u32, guess: &Code, feedback: Feedback);

    fn round_finished(&mut self, outcome: &RoundOutcome);
}

/// One scored guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn: u32,
    pub guess: Code,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Playing,
    /// The code was broken on turn `turns`.
    Solved { turns: u32 },
    /// Every turn was used without breaking the code.
    Exhausted,
}

/// How a finished round ended. The secret is revealed either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub solved: bool,
    pub secret: Code,
    pub turns_used: u32,
}

/// A single round: one secret, a fixed turn budget, and the guesses made so far.
#[derive(Debug)]
pub struct Round {
    config: Config,
    secret: Code,
    history: Vec<TurnRecord>,
    state: RoundState,
}

impl Round {
    pub fn new(config: Config, secret: Code) -> Result<Self, GameError> {
        if !is_valid_secret(&secret, &config) {
            return Err(GameError::InvalidSecret(secret));
        }
        info_log!(
            "round started: {} turns, length {}, symbols {}",
            config.turns(),
            config.length(),
            config.symbols()
        );
        Ok(Self {
            config,
            secret,
            history: Vec::new(),
            state: RoundState::Playing,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != RoundState::Playing
    }

    pub fn turns_used(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.history.last()
    }

    /// The outcome once the round has ended; `None` while it is still being played.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.state {
            RoundState::Playing => None,
            RoundState::Solved { .. } | RoundState::Exhausted => Some(RoundOutcome {
                solved: matches!(self.state, RoundState::Solved { .. }),
                secret: self.secret.clone(),
                turns_used: self.turns_used(),
            }),
        }
    }

    /// Scores `guess`, records the turn, and moves to a terminal state when the code is broken
    /// or the last turn is spent.
    pub fn submit_guess(&mut self, guess: Code) -> Result<Feedback, GameError> {
        if self.is_over() {
            return Err(GameError::RoundOver);
        }
        if !is_valid_guess(&guess, &self.config) {
            return Err(GameError::LengthMismatch {
                expected: self.config.length(),
                actual: guess.len(),
            });
        }

        let feedback = score(&self.secret, &guess)?;
        let turn = self.turns_used() + 1;
        debug_log!("turn {}: {} -> {:?}", turn, guess, feedback);
        self.history.push(TurnRecord {
            turn,
            guess,
            feedback,
        });

        if feedback.is_solved(self.config.length()) {
            self.state = RoundState::Solved { turns: turn };
            info_log!("code broken in {} turns", turn);
        } else if turn >= self.config.turns() {
            self.state = RoundState::Exhausted;
            info_log!("turn budget of {} exhausted", turn);
        }
        Ok(feedback)
    }
}

/// Plays `round` to the end, pulling guesses from `source` and reporting each turn to `sink`.
pub fn play_round<S, F>(
    round: &mut Round,
    source: &mut S,
    sink: &mut F,
) -> Result<RoundOutcome, GameError>
where
    S: GuessSource + ?Sized,
    F: FeedbackSink + ?Sized,
{
    while !round.is_over() {
        let config = *round.config();
        let guess = source.next_guess(&config, round.last_turn())?;
        let feedback = round.submit_guess(guess)?;
        if let Some(turn) = round.last_turn() {
            sink.turn_scored(turn.turn, &turn.guess, feedback);
        }
    }
    let outcome = round.outcome().ok_or(GameError::RoundOver)?;
    sink.round_finished(&outcome);
    Ok(outcome)
}
