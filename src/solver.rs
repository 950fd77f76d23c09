use crate::code::Code;
use crate::config::{Config, MAX_LENGTH};
use crate::error::GameError;
use crate::game_state::{GuessSource, TurnRecord};
use crate::{debug_log, info_log};
use crate::scorer::{Feedback, score_symbols};
use std::collections::VecDeque;

/// A code packed into a fixed-size array. Only the first `length` slots are meaningful.
type Slots = [u8; MAX_LENGTH];

/// Every code of a fixed length over an inclusive symbol range, in lexicographic order.
///
/// The universe ignores the duplicate rule: with duplicates disallowed it still holds codes
/// that could never be a secret.
#[derive(Debug, Clone)]
pub struct Universe {
    lower: u8,
    upper: u8,
    length: usize,
    next: Option<Slots>,
}

impl Universe {
    pub fn new(config: &Config) -> Self {
        Self {
            lower: config.lower_bound(),
            upper: config.symbols(),
            length: config.length(),
            next: Some([config.lower_bound(); MAX_LENGTH]),
        }
    }

    /// Number of codes in the full universe of `config`.
    pub fn size(config: &Config) -> usize {
        config
            .alphabet_size()
            .checked_pow(config.length() as u32)
            .unwrap_or(usize::MAX)
    }

    fn next_slots(&mut self) -> Option<Slots> {
        let current = self.next.take()?;
        let mut successor = current;
        // Odometer step: bump the last digit that isn't at the top, reset everything after it.
        if let Some(pos) = successor[..self.length]
            .iter()
            .rposition(|s| *s < self.upper)
        {
            successor[pos] += 1;
            for s in &mut successor[pos + 1..self.length] {
                *s = self.lower;
            }
            self.next = Some(successor);
        }
        Some(current)
    }

    fn slots(mut self) -> impl Iterator<Item = Slots> {
        std::iter::from_fn(move || self.next_slots())
    }
}

impl Iterator for Universe {
    type Item = Code;

    fn next(&mut self) -> Option<Code> {
        let length = self.length;
        self.next_slots()
            .map(|slots| Code::new(slots[..length].to_vec()))
    }
}

/// The automated codebreaker's working set: every code still consistent with all feedback.
///
/// Until the first feedback arrives the set is the whole universe and is never allocated; the
/// first `narrow` streams the universe through the filter instead. Candidates are kept as
/// packed arrays in universe order and handed out from the front.
#[derive(Debug, Clone)]
pub struct CandidateSpace {
    config: Config,
    opened: bool,
    candidates: Option<VecDeque<Slots>>,
}

impl CandidateSpace {
    pub fn new(config: &Config) -> Self {
        Self {
            config: *config,
            opened: false,
            candidates: None,
        }
    }

    /// The fixed first guess: the first half 1s, the rest 2s (`1-1-2-2` for length four).
    pub fn opening_guess(config: &Config) -> Code {
        let ones = config.length() / 2;
        Code::new(
            (0..config.length())
                .map(|i| if i < ones { 1 } else { 2 })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match &self.candidates {
            Some(candidates) => candidates.len(),
            None => Universe::size(&self.config),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, code: &Code) -> bool {
        let length = self.config.length();
        if code.len() != length {
            return false;
        }
        match &self.candidates {
            Some(candidates) => candidates
                .iter()
                .any(|slots| &slots[..length] == code.symbols()),
            None => code
                .symbols()
                .iter()
                .all(|s| self.config.alphabet().contains(s)),
        }
    }

    /// Keeps only the candidates that would have produced `feedback` had they been the secret.
    pub fn narrow(&mut self, guess: &Code, feedback: Feedback) -> Result<(), GameError> {
        let length = self.config.length();
        if guess.len() != length {
            return Err(GameError::LengthMismatch {
                expected: length,
                actual: guess.len(),
            });
        }
        let before = self.len();
        let guess_symbols = guess.symbols();
        let consistent =
            |slots: &Slots| score_symbols(&slots[..length], guess_symbols) == feedback;
        let narrowed = match self.candidates.take() {
            Some(mut candidates) => {
                candidates.retain(consistent);
                candidates
            }
            None => Universe::new(&self.config)
                .slots()
                .filter(consistent)
                .collect(),
        };
        self.candidates = Some(narrowed);
        debug_log!(
            "narrowed on {} ({}, {}): {} -> {} candidates",
            guess,
            feedback.exact,
            feedback.value,
            before,
            self.len()
        );
        Ok(())
    }

    /// Produces the next guess. The first call returns the opening guess; later calls fold in
    /// the previous guess and its feedback, then hand out the first remaining candidate.
    pub fn next_guess(&mut self, previous: Option<(&Code, Feedback)>) -> Result<Code, GameError> {
        match previous {
            Some((guess, feedback)) => self.narrow(guess, feedback)?,
            None if !self.opened => {
                self.opened = true;
                return Ok(Self::opening_guess(&self.config));
            }
            None => {}
        }
        self.opened = true;
        self.take_first()
    }

    fn take_first(&mut self) -> Result<Code, GameError> {
        let config = self.config;
        let candidates = self
            .candidates
            .get_or_insert_with(|| Universe::new(&config).slots().collect());
        let slots = candidates
            .pop_front()
            .ok_or(GameError::NoConsistentCandidate)?;
        Ok(Code::new(slots[..config.length()].to_vec()))
    }
}

/// A `GuessSource` backed by a `CandidateSpace`.
pub struct ComputerGuesser {
    space: CandidateSpace,
}

impl ComputerGuesser {
    pub fn new(config: &Config) -> Self {
        Self {
            space: CandidateSpace::new(config),
        }
    }

    pub fn remaining(&self) -> usize {
        self.space.len()
    }
}

impl GuessSource for ComputerGuesser {
    fn next_guess(
        &mut self,
        _config: &Config,
        previous: Option<&TurnRecord>,
    ) -> Result<Code, GameError> {
        let guess = self
            .space
            .next_guess(previous.map(|turn| (&turn.guess, turn.feedback)))?;
        info_log!(
            "computer guesses {} with {} candidates left",
            guess,
            self.space.len()
        );
        Ok(guess)
    }
}
