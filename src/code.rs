use crate::config::Config;
use crate::error::GameError;
use crate::validator::is_valid_secret;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of symbols, used both for secrets and for guesses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Vec<u8>);

impl Code {
    pub fn new(symbols: Vec<u8>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Code {
    fn from(symbols: Vec<u8>) -> Self {
        Self(symbols)
    }
}

impl<const N: usize> From<[u8; N]> for Code {
    fn from(symbols: [u8; N]) -> Self {
        Self(symbols.to_vec())
    }
}

/// Parses one decimal digit per symbol. Dashes, commas and whitespace are skipped so a
/// displayed code (`4-3-6-2`) reads back unchanged.
impl FromStr for Code {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !(c.is_whitespace() || *c == '-' || *c == ','))
            .map(|c| {
                c.to_digit(10)
                    .map(|digit| digit as u8)
                    .ok_or_else(|| GameError::InvalidInput(format!("'{c}' is not a digit")))
            })
            .collect::<Result<Vec<u8>, GameError>>()
            .map(Code)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Draws a random secret that satisfies `config`.
pub fn generate_secret<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Code {
    let code = if config.allow_duplicates() {
        let alphabet = config.alphabet();
        (0..config.length())
            .map(|_| rng.gen_range(alphabet.clone()))
            .collect()
    } else {
        let mut alphabet: Vec<u8> = config.alphabet().collect();
        alphabet.shuffle(rng);
        alphabet.truncate(config.length());
        alphabet
    };
    let code = Code(code);
    debug_assert!(is_valid_secret(&code, config));
    code
}
