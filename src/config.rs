use crate::error::GameError;
use std::fmt;
use std::ops::RangeInclusive;

/// Longest code the core supports. Human input is one digit per symbol.
pub const MAX_LENGTH: usize = 8;
/// Largest alphabet the core supports, so every symbol fits in a single digit.
pub const MAX_SYMBOLS: u8 = 9;

/// Bounds the rule editor offers to players.
pub const TURNS_RANGE: RangeInclusive<u32> = 1..=50;
pub const LENGTH_RANGE: RangeInclusive<usize> = 4..=MAX_LENGTH;
pub const SYMBOLS_RANGE: RangeInclusive<u8> = 6..=MAX_SYMBOLS;

/// The rules of one round. Immutable once built; changing a rule yields a new `Config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    turns: u32,
    length: usize,
    symbols: u8,
    allow_blanks: bool,
    allow_duplicates: bool,
}

/// A single rule edit, as chosen from the rules menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Turns(u32),
    Length(usize),
    Symbols(u8),
    Blanks(bool),
    Duplicates(bool),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            turns: 12,
            length: 4,
            symbols: 6,
            allow_blanks: false,
            allow_duplicates: false,
        }
    }
}

impl Config {
    /// Builds a configuration, rejecting values the core cannot play with.
    pub fn new(
        turns: u32,
        length: usize,
        symbols: u8,
        allow_blanks: bool,
        allow_duplicates: bool,
    ) -> Result<Self, GameError> {
        let config = Self {
            turns,
            length,
            symbols,
            allow_blanks,
            allow_duplicates,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn symbols(&self) -> u8 {
        self.symbols
    }

    pub fn allow_blanks(&self) -> bool {
        self.allow_blanks
    }

    pub fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Smallest legal symbol: 0 when blanks are allowed, 1 otherwise.
    pub fn lower_bound(&self) -> u8 {
        if self.allow_blanks { 0 } else { 1 }
    }

    /// Every symbol a secret may use, in ascending order.
    pub fn alphabet(&self) -> RangeInclusive<u8> {
        self.lower_bound()..=self.symbols
    }

    pub fn alphabet_size(&self) -> usize {
        usize::from(self.symbols - self.lower_bound()) + 1
    }

    fn validate(&self) -> Result<(), GameError> {
        if self.turns == 0 {
            return Err(GameError::InvalidConfiguration(
                "there must be at least one turn".to_string(),
            ));
        }
        if !(1..=MAX_LENGTH).contains(&self.length) {
            return Err(GameError::InvalidConfiguration(format!(
                "code length {} is outside 1-{MAX_LENGTH}",
                self.length
            )));
        }
        if !(1..=MAX_SYMBOLS).contains(&self.symbols) {
            return Err(GameError::InvalidConfiguration(format!(
                "symbol count {} is outside 1-{MAX_SYMBOLS}",
                self.symbols
            )));
        }
        if !self.allow_duplicates && self.alphabet_size() < self.length {
            return Err(GameError::InvalidConfiguration(format!(
                "{} distinct symbols cannot fill a code of length {} without duplicates",
                self.alphabet_size(),
                self.length
            )));
        }
        Ok(())
    }

    /// Returns a new configuration with `rule` applied, enforcing the rule editor's bounds.
    pub fn apply(&self, rule: Rule) -> Result<Self, GameError> {
        let mut next = *self;
        match rule {
            Rule::Turns(turns) => {
                check_range("turns", turns, &TURNS_RANGE)?;
                next.turns = turns;
            }
            Rule::Length(length) => {
                check_range("length", length, &LENGTH_RANGE)?;
                next.length = length;
            }
            Rule::Symbols(symbols) => {
                check_range("characters", symbols, &SYMBOLS_RANGE)?;
                next.symbols = symbols;
            }
            Rule::Blanks(allowed) => next.allow_blanks = allowed,
            Rule::Duplicates(allowed) => next.allow_duplicates = allowed,
        }
        next.validate()?;
        Ok(next)
    }
}

fn check_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Result<(), GameError>
where
    T: PartialOrd + fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidConfiguration(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The code must be {} characters in length, and there are {} options for each slot.",
            self.length, self.symbols
        )?;
        writeln!(
            f,
            "The code {} contain any blanks.",
            if self.allow_blanks { "can" } else { "can't" }
        )?;
        writeln!(
            f,
            "The code {} contain duplicates.",
            if self.allow_duplicates { "can" } else { "can't" }
        )?;
        write!(f, "The codebreaker has {} tries to break the code.", self.turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_rules() {
        let config = Config::default();
        assert_eq!(config.turns(), 12);
        assert_eq!(config.length(), 4);
        assert_eq!(config.symbols(), 6);
        assert!(!config.allow_blanks());
        assert!(!config.allow_duplicates());
        assert_eq!(config.alphabet(), 1..=6);
    }

    #[test]
    fn test_blanks_lower_the_alphabet() {
        let config = Config::new(10, 4, 6, true, false).unwrap();
        assert_eq!(config.lower_bound(), 0);
        assert_eq!(config.alphabet_size(), 7);
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        assert_matches!(
            Config::new(0, 4, 6, false, false),
            Err(GameError::InvalidConfiguration(_))
        );
        assert_matches!(
            Config::new(12, 0, 6, false, false),
            Err(GameError::InvalidConfiguration(_))
        );
        assert_matches!(
            Config::new(12, 9, 9, false, true),
            Err(GameError::InvalidConfiguration(_))
        );
        assert_matches!(
            Config::new(12, 4, 10, false, false),
            Err(GameError::InvalidConfiguration(_))
        );
    }

    #[test]
    fn test_new_rejects_impossible_distinct_codes() {
        // Three symbols cannot fill four distinct slots, unless blanks add a fourth.
        assert!(Config::new(12, 4, 3, false, false).is_err());
        assert!(Config::new(12, 4, 3, true, false).is_ok());
        assert!(Config::new(12, 4, 3, false, true).is_ok());
    }

    #[test]
    fn test_apply_returns_new_value() {
        let base = Config::default();
        let changed = base.apply(Rule::Turns(20)).unwrap();
        assert_eq!(changed.turns(), 20);
        assert_eq!(base.turns(), 12);
    }

    #[test]
    fn test_apply_enforces_editor_bounds() {
        let config = Config::default();
        assert!(config.apply(Rule::Turns(51)).is_err());
        assert!(config.apply(Rule::Length(3)).is_err());
        assert!(config.apply(Rule::Symbols(5)).is_err());
        // Eight distinct slots need at least eight symbols.
        assert!(config.apply(Rule::Length(8)).is_err());
        let wide = config.apply(Rule::Symbols(9)).unwrap();
        assert_eq!(wide.apply(Rule::Length(8)).unwrap().length(), 8);
    }

    #[test]
    fn test_apply_checks_combined_rules() {
        // Six symbols can't fill seven or eight slots until duplicates are allowed.
        let err = Config::default().apply(Rule::Length(7)).unwrap_err();
        assert_matches!(err, GameError::InvalidConfiguration(_));

        let config = Config::default()
            .apply(Rule::Duplicates(true))
            .and_then(|c| c.apply(Rule::Length(8)))
            .unwrap();
        assert_eq!(config.length(), 8);
    }

    #[test]
    fn test_display_lists_rules() {
        let text = Config::default().to_string();
        assert!(text.contains("4 characters in length"));
        assert!(text.contains("can't contain any blanks"));
        assert!(text.contains("12 tries"));
    }
}
