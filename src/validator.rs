use crate::code::Code;
use crate::config::Config;

/// A secret must have the configured length, stay inside the alphabet, and repeat a symbol
/// only when duplicates are allowed.
pub fn is_valid_secret(code: &Code, config: &Config) -> bool {
    has_configured_length(code, config)
        && code
            .symbols()
            .iter()
            .all(|symbol| config.alphabet().contains(symbol))
        && (config.allow_duplicates() || !has_duplicates(code))
}

/// Guesses are only checked for length. A codebreaker may probe with symbols a secret could
/// never contain.
pub fn is_valid_guess(code: &Code, config: &Config) -> bool {
    has_configured_length(code, config)
}

pub fn has_duplicates(code: &Code) -> bool {
    let symbols = code.symbols();
    symbols
        .iter()
        .enumerate()
        .any(|(i, symbol)| symbols[..i].contains(symbol))
}

fn has_configured_length(code: &Code, config: &Config) -> bool {
    code.len() == config.length()
}
