// Integration tests for the mastermind game
// These tests verify that all modules work together correctly

use mastermind::solver::Universe;
use mastermind::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;

/// Collects everything the round reports.
#[derive(Default)]
struct Transcript {
    turns: Vec<(u32, Code, Feedback)>,
    outcome: Option<RoundOutcome>,
}

impl FeedbackSink for Transcript {
    fn turn_scored(&mut self, turn: u32, guess: &Code, feedback: Feedback) {
        self.turns.push((turn, guess.clone(), feedback));
    }

    fn round_finished(&mut self, outcome: &RoundOutcome) {
        self.outcome = Some(outcome.clone());
    }
}

#[test]
fn test_end_to_end_human_round() {
    // Default rules, secret 4-3-6-2, broken on the third guess
    let mut round = Round::new(Config::default(), Code::from([4, 3, 6, 2])).unwrap();
    let mut guesser = cli::CliInterface::new(Cursor::new("2222\n2634\n4362\n"), "Ann");
    let mut transcript = Transcript::default();

    let outcome = play_round(&mut round, &mut guesser, &mut transcript).unwrap();

    let feedback: Vec<Feedback> = transcript.turns.iter().map(|(_, _, f)| *f).collect();
    assert_eq!(
        feedback,
        vec![
            Feedback::new(1, 0),
            Feedback::new(0, 4),
            Feedback::new(4, 0)
        ]
    );
    assert_eq!(round.state(), RoundState::Solved { turns: 3 });
    assert!(outcome.solved);
    assert_eq!(outcome.turns_used, 3);
    assert_eq!(transcript.outcome, Some(outcome));
}

#[test]
fn test_human_reprompted_on_bad_guess() {
    // A short guess and a typo are retried without costing a turn
    let mut round = Round::new(Config::default(), Code::from([4, 3, 6, 2])).unwrap();
    let mut guesser = cli::CliInterface::new(Cursor::new("436\n43x2\n4362\n"), "Ann");
    let mut transcript = Transcript::default();

    let outcome = play_round(&mut round, &mut guesser, &mut transcript).unwrap();

    assert!(outcome.solved);
    assert_eq!(outcome.turns_used, 1);
}

#[test]
fn test_exhaustion_reveals_secret() {
    let config = Config::default().apply(Rule::Turns(1)).unwrap();
    let secret = Code::from([4, 3, 6, 2]);
    let mut round = Round::new(config, secret.clone()).unwrap();
    let mut guesser = cli::CliInterface::new(Cursor::new("1111\n"), "Ann");
    let mut transcript = Transcript::default();

    let outcome = play_round(&mut round, &mut guesser, &mut transcript).unwrap();

    assert_eq!(round.state(), RoundState::Exhausted);
    assert!(!outcome.solved);
    assert_eq!(outcome.turns_used, 1);
    assert_eq!(outcome.secret, secret);
    assert_eq!(transcript.turns.len(), 1);
}

#[test]
fn test_computer_solves_every_default_secret() {
    // Every legal secret under the default rules falls within the default turn budget
    let config = Config::default();
    let secrets: Vec<Code> = Universe::new(&config)
        .filter(|code| is_valid_secret(code, &config))
        .collect();
    assert_eq!(secrets.len(), 360);

    for secret in secrets {
        let mut round = Round::new(config, secret.clone()).unwrap();
        let mut guesser = ComputerGuesser::new(&config);
        let mut transcript = Transcript::default();
        let outcome = play_round(&mut round, &mut guesser, &mut transcript).unwrap();
        assert!(outcome.solved, "computer failed to break {secret}");
    }
}

#[test]
fn test_computer_with_blanks_and_duplicates() {
    let config = Config::new(12, 4, 6, true, true).unwrap();
    for secret in [[0, 0, 0, 0], [6, 0, 6, 0], [3, 3, 1, 0]] {
        let mut round = Round::new(config, Code::from(secret)).unwrap();
        let mut transcript = Transcript::default();
        let outcome =
            play_round(&mut round, &mut ComputerGuesser::new(&config), &mut transcript).unwrap();
        assert!(outcome.solved);
    }
}

#[test]
fn test_computer_narrowing_never_drops_secret() {
    // Replay the computer's game and check the candidate space after each feedback
    let config = Config::default();
    let secret = Code::from([2, 5, 1, 6]);
    let mut space = CandidateSpace::new(&config);
    let mut previous: Option<(Code, Feedback)> = None;
    let mut size = space.len();

    loop {
        let guess = space
            .next_guess(previous.as_ref().map(|(g, f)| (g, *f)))
            .unwrap();
        assert!(space.len() <= size);
        size = space.len();
        let feedback = score(&secret, &guess).unwrap();
        if feedback.is_solved(config.length()) {
            break;
        }
        previous = Some((guess, feedback));
        let mut probe = space.clone();
        let (g, f) = previous.as_ref().unwrap();
        probe.narrow(g, *f).unwrap();
        assert!(probe.contains(&secret));
    }
}

#[test]
fn test_computer_secret_session() {
    // One player, the computer holds a seeded secret; reveal it and guess it directly
    let config = Config::default();
    let expected = generate_secret(&config, &mut StdRng::seed_from_u64(5));

    let input = format!("1\nAnn\nn\n0\n{expected}\nn\n");
    let mut reader = Cursor::new(input);
    let games = run_session(&mut reader, config, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(games.len(), 1);
    assert_eq!(games[0].outcome.secret, expected);
    assert!(games[0].outcome.solved);
    assert_eq!(games[0].outcome.turns_used, 1);
}

#[test]
fn test_session_with_rule_change_and_replay() {
    // Change the rules, let the computer break the code, then play a second game
    let input = "1\nAnn\ny\n0\n5\ndone\n1\n1234\ny\n1\nAnn\nn\n1\n6543\nn\n";
    let mut reader = Cursor::new(input);
    let games = run_session(&mut reader, Config::default(), &mut StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(games.len(), 2);
    // The edited turn budget applies to the first game only
    assert_eq!(games[0].rules.turns(), 5);
    assert_eq!(games[0].outcome.secret, Code::from([1, 2, 3, 4]));
    assert!(games[0].outcome.turns_used <= 5);
    assert_eq!(games[1].rules, Config::default());
    assert_eq!(games[1].outcome.secret, Code::from([6, 5, 4, 3]));
    assert!(games[1].outcome.solved);
}

#[test]
fn test_session_input_closed() {
    // Running out of input mid-game surfaces as an error instead of looping forever
    let mut reader = Cursor::new("1\nAnn\nn\n0\n");
    let result = run_session(&mut reader, Config::default(), &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(GameError::InputClosed)));
}

#[test]
fn test_invalid_secret_rejected_at_round_setup() {
    let config = Config::default();
    assert!(matches!(
        Round::new(config, Code::from([1, 1, 2, 3])),
        Err(GameError::InvalidSecret(_))
    ));
    let duplicates = config.apply(Rule::Duplicates(true)).unwrap();
    assert!(Round::new(duplicates, Code::from([1, 1, 2, 3])).is_ok());
}
