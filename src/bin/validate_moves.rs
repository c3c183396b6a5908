//! Validate that every journaled move obeys the basic movement rules
//!
//! Scans all `.jsonl` journals in a directory and reports any move that
//! leaves the board or reverses into the snake's own neck. Fallback answers
//! from fully trapped positions are not counted.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use fieldsnake::config::Config;
use fieldsnake::replay::{check_legality, IllegalMove, ReplayEngine};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <directory>", args[0]);
        eprintln!("Example: {} tests/fixtures/", args[0]);
        process::exit(1);
    }

    let dir_path = &args[1];

    let mut paths: Vec<PathBuf> = match fs::read_dir(dir_path) {
        Ok(dir) => dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("jsonl"))
            .collect(),
        Err(e) => {
            eprintln!("Failed to read directory '{}': {}", dir_path, e);
            process::exit(1);
        }
    };
    paths.sort();

    if paths.is_empty() {
        eprintln!("No .jsonl files found in: {}", dir_path);
        process::exit(1);
    }

    println!("Validating {} journal files...", paths.len());
    println!("========================================\n");

    let loader = ReplayEngine::new(Config::default_hardcoded(), false);
    let mut total_entries = 0;
    let mut total_illegal = 0;

    for path in paths {
        let name = path.display().to_string();
        let entries = match loader.load_log_file(&path) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Skipping {}: {}", name, e);
                continue;
            }
        };

        let mut game_illegal = 0;

        for entry in &entries {
            total_entries += 1;

            let verdict = match check_legality(entry) {
                Ok(verdict) => verdict,
                Err(e) => {
                    println!("UNREADABLE MOVE: {} turn {}: {}", name, entry.turn, e);
                    game_illegal += 1;
                    continue;
                }
            };

            let head = entry.you.head;
            match verdict {
                None => {}
                Some(IllegalMove::OffBoard) => {
                    println!(
                        "ILLEGAL MOVE: {} turn {}: ({},{}) + {} leaves the {}x{} board",
                        name,
                        entry.turn,
                        head.x,
                        head.y,
                        entry.chosen_move,
                        entry.board.width,
                        entry.board.height
                    );
                    game_illegal += 1;
                }
                Some(IllegalMove::IntoNeck) => {
                    println!(
                        "NECK COLLISION: {} turn {}: ({},{}) + {} reverses into the neck",
                        name, entry.turn, head.x, head.y, entry.chosen_move
                    );
                    game_illegal += 1;
                }
            }
        }

        if game_illegal > 0 {
            println!("  {} had {} illegal moves\n", name, game_illegal);
        }
        total_illegal += game_illegal;
    }

    println!("\n========================================");
    println!("Validation complete:");
    println!("  Total entries checked: {}", total_entries);
    println!("  Illegal moves found: {}", total_illegal);

    if total_illegal == 0 {
        println!("\n✅ All moves are legal!");
    } else {
        println!("\n❌ Found illegal moves!");
        process::exit(1);
    }
}
