// Re-runs journaled decisions against the current engine and configuration
//
// Usage:
//   cargo run --bin replay -- <journal.jsonl> (--all | --turns 5,10 | --validate 5:up,10:left|right)
//                            [--config Snake.toml] [--verbose] [--strict]
//
// --strict exits non-zero when any replayed move differs from the journal,
// which makes the tool usable as a regression gate after retuning Snake.toml.

use std::env;
use std::process;

use fieldsnake::config::Config;
use fieldsnake::replay::ReplayEngine;
use fieldsnake::types::Direction;

const USAGE: &str = "\
Battlesnake Decision Replay Tool

USAGE:
  replay <journal.jsonl> <MODE> [OPTIONS]

MODES:
  --all                   Replay every journaled turn
  --turns <T1,T2,...>     Replay only these turns
  --validate <T:M,...>    Check journaled moves, e.g. 5:up,10:left|right

OPTIONS:
  --config <path>         Path to Snake.toml (default: Snake.toml)
  --verbose               Log every replayed turn
  --strict                Exit with status 2 on any mismatch
  --help                  Show this help message";

enum Mode {
    All,
    Turns(Vec<i32>),
    Validate(Vec<(i32, Vec<Direction>)>),
}

struct Options {
    journal: String,
    config_path: String,
    verbose: bool,
    strict: bool,
    mode: Mode,
}

fn parse_turns(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(i32, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let (turn, moves) = pair
                .trim()
                .split_once(':')
                .ok_or_else(|| format!("Invalid format '{}'. Expected 'turn:move'", pair))?;

            let turn = turn
                .parse::<i32>()
                .map_err(|e| format!("Invalid turn number '{}': {}", turn, e))?;

            // Several acceptable moves separated by '|'
            let moves = moves
                .split('|')
                .map(|m| Direction::parse(m.trim()))
                .collect::<Result<Vec<_>, _>>()?;

            Ok((turn, moves))
        })
        .collect()
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let journal = args
        .first()
        .filter(|a| !a.starts_with("--"))
        .cloned()
        .ok_or("Missing journal file")?;

    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut strict = false;
    let mut mode = None;

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let mut value = || {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("{} requires an argument", flag))
        };

        match flag.as_str() {
            "--all" => mode = Some(Mode::All),
            "--turns" => mode = Some(Mode::Turns(parse_turns(&value()?)?)),
            "--validate" => mode = Some(Mode::Validate(parse_expected_moves(&value()?)?)),
            "--config" => config_path = value()?,
            "--verbose" => verbose = true,
            "--strict" => strict = true,
            other => return Err(format!("Unknown option '{}'", other)),
        }
    }

    let mode = mode.ok_or("Must specify --all, --turns, or --validate")?;

    Ok(Options {
        journal,
        config_path,
        verbose,
        strict,
        mode,
    })
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}\n\n{}", e, USAGE);
        process::exit(1);
    });

    let config = Config::from_file(&options.config_path).unwrap_or_else(|e| {
        eprintln!(
            "Warning: Could not load config from '{}': {}. Using defaults.",
            options.config_path, e
        );
        Config::default_hardcoded()
    });

    let engine = ReplayEngine::new(config, options.verbose);

    let entries = engine.load_log_file(&options.journal).unwrap_or_else(|e| {
        eprintln!("Error loading journal: {}", e);
        process::exit(1);
    });

    if entries.is_empty() {
        eprintln!("Error: Journal is empty");
        process::exit(1);
    }

    println!("Loaded {} journal entries from {}", entries.len(), options.journal);

    let results = match &options.mode {
        Mode::All => engine.replay_all(&entries),
        Mode::Turns(turns) => engine.replay_turns(&entries, turns).unwrap_or_else(|e| {
            eprintln!("Error during replay: {}", e);
            process::exit(1);
        }),
        Mode::Validate(expected) => {
            match engine.validate_expected_moves(&entries, expected) {
                Ok(()) => println!("✓ All {} expected move(s) validated", expected.len()),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
            return;
        }
    };

    engine.print_report(&results);

    let stats = engine.generate_stats(&results);
    if options.strict && stats.mismatches > 0 {
        process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_expected_moves_with_alternatives() {
        let parsed = parse_expected_moves("5:up,10:left|right").unwrap();
        assert_eq!(parsed[0], (5, vec![Direction::Up]));
        assert_eq!(parsed[1], (10, vec![Direction::Left, Direction::Right]));
        assert!(parse_expected_moves("5-up").is_err());
    }

    #[test]
    fn test_parse_args_requires_mode() {
        assert!(parse_args(&args(&["game.jsonl"])).is_err());
        assert!(parse_args(&args(&["--all"])).is_err());
    }

    #[test]
    fn test_parse_args_full() {
        let options = parse_args(&args(&[
            "game.jsonl",
            "--turns",
            "1,2",
            "--config",
            "alt.toml",
            "--strict",
        ]))
        .unwrap();
        assert_eq!(options.journal, "game.jsonl");
        assert_eq!(options.config_path, "alt.toml");
        assert!(options.strict);
        assert!(!options.verbose);
        assert!(matches!(options.mode, Mode::Turns(ref t) if t == &vec![1, 2]));
    }

    #[test]
    fn test_parse_args_missing_value() {
        assert!(parse_args(&args(&["game.jsonl", "--turns"])).is_err());
    }
}
