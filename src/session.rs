use crate::cli::{
    AnnouncedGuesser, CliInterface, TerminalSink, display_round_banner, display_rules, edit_rules, prompt_line,
    read_number_in, read_secret, read_yes_no,
};
use crate::code::{Code, generate_secret};
use crate::config::Config;
use crate::error::GameError;
use crate::game_state::{GuessSource, Round, RoundOutcome, play_round};
use crate::info_log;
use crate::solver::ComputerGuesser;
use rand::Rng;
use std::io::BufRead;

/// Who holds the secret for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codemaster {
    Computer,
    /// Index into the session's players.
    Player(usize),
}

/// Who tries to break the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codebreaker {
    Computer,
    Player(usize),
}

/// The people at the keyboard for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub players: Vec<String>,
}

impl Table {
    /// A lone player always faces the computer; two players face each other.
    pub fn against_computer(&self) -> bool {
        self.players.len() == 1
    }

    /// The codebreaker is whoever isn't holding the secret.
    pub fn codebreaker(&self, codemaster: &Codemaster) -> Codebreaker {
        match codemaster {
            Codemaster::Computer => Codebreaker::Player(0),
            Codemaster::Player(_) if self.against_computer() => Codebreaker::Computer,
            Codemaster::Player(i) => Codebreaker::Player(1 - i),
        }
    }
}

/// One finished game of a session and the rules it was played under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub rules: Config,
    pub outcome: RoundOutcome,
}

/// Plays games until the players decline another one. Every new game starts from `rules`.
pub fn run_session<R, G>(
    reader: &mut R,
    rules: Config,
    rng: &mut G,
) -> Result<Vec<GameRecord>, GameError>
where
    R: BufRead,
    G: Rng + ?Sized,
{
    println!("Welcome to Mastermind!");
    let mut games = Vec::new();
    loop {
        let table = read_table(reader)?;
        println!("Let's get started!");
        let config = negotiate_rules(reader, rules)?;
        let outcome = play_game(reader, &table, config, rng)?;
        games.push(GameRecord {
            rules: config,
            outcome,
        });
        if !read_yes_no(reader, "Would you like to play again? (y/n) ")? {
            info_log!("session over after {} games", games.len());
            return Ok(games);
        }
    }
}

/// Plays a single round with an established table and rules.
pub fn play_game<R, G>(
    reader: &mut R,
    table: &Table,
    config: Config,
    rng: &mut G,
) -> Result<RoundOutcome, GameError>
where
    R: BufRead,
    G: Rng + ?Sized,
{
    let codemaster = read_codemaster(reader, table)?;
    let secret = establish_secret(reader, table, &codemaster, &config, rng)?;
    let mut round = Round::new(config, secret)?;
    display_round_banner(&config);

    let codebreaker = table.codebreaker(&codemaster);
    info_log!("{:?} plays against {:?}", codebreaker, codemaster);
    let mut source: Box<dyn GuessSource + '_> = match codebreaker {
        Codebreaker::Computer => Box::new(AnnouncedGuesser::new(ComputerGuesser::new(&config))),
        Codebreaker::Player(i) => Box::new(CliInterface::new(&mut *reader, table.players[i].as_str())),
    };
    play_round(&mut round, source.as_mut(), &mut TerminalSink)
}

/// Asks how many people are playing and what they are called.
pub fn read_table<R: BufRead>(reader: &mut R) -> Result<Table, GameError> {
    let count = read_number_in(reader, "How many players are there today? ", 1, 2)?;
    let mut players = Vec::new();
    for n in 1..=count {
        let name = prompt_line(
            reader,
            &format!("Let's get set up! Player {n}, please enter your name: "),
        )?;
        println!("Hello {name}, welcome to Mastermind!");
        players.push(name);
    }
    Ok(Table { players })
}

/// Shows the rules and lets the players change them before the round starts.
pub fn negotiate_rules<R: BufRead>(reader: &mut R, rules: Config) -> Result<Config, GameError> {
    display_rules(&rules);
    if read_yes_no(reader, "Did you want to change the rules? (y/n) ")? {
        edit_rules(reader, rules)
    } else {
        Ok(rules)
    }
}

/// Asks who will hold the secret. The computer may only do so against a lone player.
pub fn read_codemaster<R: BufRead>(reader: &mut R, table: &Table) -> Result<Codemaster, GameError> {
    let lowest = if table.against_computer() {
        println!("Player 0: Computer");
        0
    } else {
        1
    };
    for (i, name) in table.players.iter().enumerate() {
        println!("Player {}: {}", i + 1, name);
    }
    let choice = read_number_in(
        reader,
        "Which player will be the code master? ",
        lowest,
        table.players.len() as u64,
    )?;
    let codemaster = match choice {
        0 => Codemaster::Computer,
        n => Codemaster::Player(n as usize - 1),
    };
    let name = match &codemaster {
        Codemaster::Computer => "Computer",
        Codemaster::Player(i) => table.players[*i].as_str(),
    };
    println!("{name} is the codemaster!");
    Ok(codemaster)
}

fn establish_secret<R, G>(
    reader: &mut R,
    table: &Table,
    codemaster: &Codemaster,
    config: &Config,
    rng: &mut G,
) -> Result<Code, GameError>
where
    R: BufRead,
    G: Rng + ?Sized,
{
    match codemaster {
        Codemaster::Computer => Ok(generate_secret(config, rng)),
        Codemaster::Player(i) => read_secret(reader, &table.players[*i], config),
    }
}
