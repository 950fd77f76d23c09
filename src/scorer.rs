use crate::code::Code;
use crate::config::MAX_LENGTH;
use crate::error::GameError;
use std::fmt;

/// The answer to a guess: how many symbols sit in the right place, and how many more share a
/// value with the secret somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    pub exact: usize,
    pub value: usize,
}

impl Feedback {
    pub fn new(exact: usize, value: usize) -> Self {
        Self { exact, value }
    }

    /// True when every one of `length` positions matched.
    pub fn is_solved(&self, length: usize) -> bool {
        self.exact == length
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "There were {} exact matches, and there were {} additional matches.",
            self.exact, self.value
        )
    }
}

/// Scores `guess` against `secret`.
///
/// Exact matches are counted first and both sides of each one are marked as used. Then, for
/// every distinct value left in the guess, all remaining secret entries holding that value
/// count as value matches. Each secret entry is therefore counted at most once, and a value the
/// guess repeats cannot match a single leftover secret entry twice.
pub fn score(secret: &Code, guess: &Code) -> Result<Feedback, GameError> {
    if secret.len() != guess.len() {
        return Err(GameError::LengthMismatch {
            expected: secret.len(),
            actual: guess.len(),
        });
    }
    if secret.len() > MAX_LENGTH {
        return Err(GameError::InvalidInput(format!(
            "codes longer than {MAX_LENGTH} symbols can't be scored"
        )));
    }
    Ok(score_symbols(secret.symbols(), guess.symbols()))
}

/// Allocation-free scoring of two equally long symbol slices of at most `MAX_LENGTH`.
pub(crate) fn score_symbols(secret: &[u8], guess: &[u8]) -> Feedback {
    debug_assert_eq!(secret.len(), guess.len());
    // A position is consumed on both sides at once, since exact matches share an index.
    let mut consumed = [false; MAX_LENGTH];
    let mut exact = 0;
    for (i, (s, g)) in secret.iter().zip(guess).enumerate() {
        if s == g {
            exact += 1;
            consumed[i] = true;
        }
    }

    let mut value = 0;
    for (j, symbol) in guess.iter().enumerate() {
        let repeated = guess[..j]
            .iter()
            .enumerate()
            .any(|(k, g)| !consumed[k] && g == symbol);
        if consumed[j] || repeated {
            continue;
        }
        value += secret
            .iter()
            .enumerate()
            .filter(|(i, s)| !consumed[*i] && *s == symbol)
            .count();
    }

    Feedback { exact, value }
}
