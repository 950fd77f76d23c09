use crate::code::Code;
use crate::config::{Config, LENGTH_RANGE, Rule, SYMBOLS_RANGE, TURNS_RANGE};
use crate::error::GameError;
use crate::game_state::{FeedbackSink, GuessSource, RoundOutcome, TurnRecord};
use crate::scorer::Feedback;
use crate::validator::{is_valid_guess, is_valid_secret};
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Mastermind in the terminal, against a friend or the computer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of guesses the codebreaker gets
    #[arg(short = 't', long, default_value_t = 12)]
    pub turns: u32,

    /// Number of symbols in a code
    #[arg(short = 'l', long, default_value_t = 4)]
    pub length: usize,

    /// Size of the symbol alphabet (symbols are numbered from 1, or from 0 with --blanks)
    #[arg(short = 's', long, default_value_t = 6)]
    pub symbols: u8,

    /// Allow blanks, written as 0
    #[arg(short = 'b', long)]
    pub blanks: bool,

    /// Allow a symbol to appear more than once in the secret
    #[arg(short = 'd', long)]
    pub duplicates: bool,

    /// Seed for the computer's secret codes, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// The starting rules described by the command line.
    pub fn config(&self) -> Result<Config, GameError> {
        Config::new(
            self.turns,
            self.length,
            self.symbols,
            self.blanks,
            self.duplicates,
        )
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Prints `prompt` without a newline and reads one trimmed line.
pub fn prompt_line<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String, GameError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(GameError::InputClosed);
    }
    Ok(input.trim().to_string())
}

/// Asks until the answer is `y` or `n`.
pub fn read_yes_no<R: BufRead>(reader: &mut R, prompt: &str) -> Result<bool, GameError> {
    loop {
        match prompt_line(reader, prompt)?.to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => {}
        }
    }
}

/// Asks until the answer is a number inside `min..=max`.
pub fn read_number_in<R: BufRead>(
    reader: &mut R,
    prompt: &str,
    min: u64,
    max: u64,
) -> Result<u64, GameError> {
    loop {
        if let Ok(n) = prompt_line(reader, prompt)?.parse::<u64>()
            && (min..=max).contains(&n)
        {
            return Ok(n);
        }
    }
}

/// Reads a code that passes `accept`, re-prompting on anything else.
fn read_code<R, F>(reader: &mut R, prompt: &str, accept: F) -> Result<Code, GameError>
where
    R: BufRead,
    F: Fn(&Code) -> bool,
{
    loop {
        match prompt_line(reader, prompt)?.parse::<Code>() {
            Ok(code) if accept(&code) => return Ok(code),
            Ok(code) => println!("{code} doesn't fit the rules. Try again."),
            Err(e) => println!("{e}. Try again."),
        }
    }
}

/// Asks `name` for a secret until it satisfies the rules.
pub fn read_secret<R: BufRead>(
    reader: &mut R,
    name: &str,
    config: &Config,
) -> Result<Code, GameError> {
    read_code(reader, &format!("{name}, please provide a code: "), |code| {
        is_valid_secret(code, config)
    })
}

/// Asks `name` for a guess until it has the right length.
pub fn read_guess<R: BufRead>(
    reader: &mut R,
    name: &str,
    config: &Config,
) -> Result<Code, GameError> {
    read_code(reader, &format!("{name}, please enter a guess: "), |code| {
        is_valid_guess(code, config)
    })
}

/// Walks the rules menu until the player types `done`, returning the edited rules.
pub fn edit_rules<R: BufRead>(reader: &mut R, mut config: Config) -> Result<Config, GameError> {
    println!("Let's change the rules of the game!");
    loop {
        display_rule_menu(&config);
        let answer = prompt_line(
            reader,
            "What would you like to change? Use the number in front of the option, or type 'done': ",
        )?;
        if answer.eq_ignore_ascii_case("done") {
            return Ok(config);
        }
        let rule = match answer.parse::<usize>() {
            Ok(0) => Rule::Turns(read_number_in(
                reader,
                &format!("Turns: ({}-{}) ", TURNS_RANGE.start(), TURNS_RANGE.end()),
                u64::from(*TURNS_RANGE.start()),
                u64::from(*TURNS_RANGE.end()),
            )? as u32),
            Ok(1) => Rule::Length(read_number_in(
                reader,
                &format!("Length: ({}-{}) ", LENGTH_RANGE.start(), LENGTH_RANGE.end()),
                *LENGTH_RANGE.start() as u64,
                *LENGTH_RANGE.end() as u64,
            )? as usize),
            Ok(2) => Rule::Symbols(read_number_in(
                reader,
                &format!("Characters: ({}-{}) ", SYMBOLS_RANGE.start(), SYMBOLS_RANGE.end()),
                u64::from(*SYMBOLS_RANGE.start()),
                u64::from(*SYMBOLS_RANGE.end()),
            )? as u8),
            Ok(3) => Rule::Blanks(read_yes_no(reader, "Blanks allowed? (y/n): ")?),
            Ok(4) => Rule::Duplicates(read_yes_no(reader, "Duplicates allowed? (y/n): ")?),
            _ => continue,
        };
        match config.apply(rule) {
            Ok(next) => config = next,
            Err(e) => println!("{e}"),
        }
    }
}

pub fn display_rules(config: &Config) {
    println!("Here are the current rules for the game.");
    println!("{config}");
}

fn display_rule_menu(config: &Config) {
    println!("0: Turns is {}", config.turns());
    println!("1: Length is {}", config.length());
    println!("2: Characters is {}", config.symbols());
    println!("3: Blanks is {}", config.allow_blanks());
    println!("4: Duplicates is {}", config.allow_duplicates());
}

pub fn display_round_banner(config: &Config) {
    println!(
        "Remember, the code is {} characters long.",
        config.length()
    );
    println!(
        "Entries can be between {} and {} and can{} have duplicate entries.",
        config.lower_bound(),
        config.symbols(),
        if config.allow_duplicates() { "" } else { "'t" }
    );
}

pub fn display_turn(turn: u32, guess: &Code, feedback: Feedback) {
    println!("{turn}: {guess} - {feedback}");
}

pub fn display_computer_guess(guess: &Code) {
    println!("The computer is making a guess... let's go with {guess}");
}

pub fn display_outcome(outcome: &RoundOutcome) {
    if outcome.solved {
        println!(
            "Game over! Cracking the code took {} turns. The code was: {}.",
            outcome.turns_used, outcome.secret
        );
    } else {
        println!(
            "The code was too strong! Try again another time. The code was {}.",
            outcome.secret
        );
    }
}

/// CLI implementation of the GuessSource trait
/// This struct wraps a BufRead reader and asks a named player for each guess
pub struct CliInterface<R: BufRead> {
    reader: R,
    name: String,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
        }
    }
}

impl<R: BufRead> GuessSource for CliInterface<R> {
    fn next_guess(
        &mut self,
        config: &Config,
        _previous: Option<&TurnRecord>,
    ) -> Result<Code, GameError> {
        read_guess(&mut self.reader, &self.name, config)
    }
}

/// Wraps an automated `GuessSource` and announces every guess it makes.
pub struct AnnouncedGuesser<S> {
    inner: S,
}

impl<S: GuessSource> AnnouncedGuesser<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: GuessSource> GuessSource for AnnouncedGuesser<S> {
    fn next_guess(
        &mut self,
        config: &Config,
        previous: Option<&TurnRecord>,
    ) -> Result<Code, GameError> {
        let guess = self.inner.next_guess(config, previous)?;
        display_computer_guess(&guess);
        Ok(guess)
    }
}

/// Prints each turn and the final result to stdout.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl FeedbackSink for TerminalSink {
    fn turn_scored(&mut self, turn: u32, guess: &Code, feedback: Feedback) {
        display_turn(turn, guess, feedback);
    }

    fn round_finished(&mut self, outcome: &RoundOutcome) {
        display_outcome(outcome);
    }
}
