// Replay module for re-running journaled decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision journals
// 2. Re-run the engine on historical positions (in parallel, turns are independent)
// 3. Compare logged vs replayed moves
// 4. Generate summary reports

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::JournalEntry;
use crate::engine::{self, legal_directions};
use crate::observer::NoopObserver;
use crate::selector::SelectionTier;
use crate::types::{validate_snapshot, Direction};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub original_score: Option<i32>,
    pub replayed_score: Option<i32>,
    pub replayed_safety: Option<usize>,
    pub tier: SelectionTier,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
    pub fallbacks: usize,
}

/// Replay engine for analyzing decision journals
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all journal entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<JournalEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: JournalEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single journal entry and compares the result
    pub fn replay_entry(&self, entry: &JournalEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move = Direction::parse(&entry.chosen_move)?;
        validate_snapshot(&entry.board, &entry.you)?;

        let start_time = Instant::now();
        let decision = engine::evaluate(&entry.board, &entry.you, entry.turn, &self.config, &NoopObserver);
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = original_move == decision.direction;

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move: decision.direction,
            matches,
            original_score: entry.score,
            replayed_score: decision.score(),
            replayed_safety: decision.safety(),
            tier: decision.tier,
            computation_time_us,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (score: {:?}, safety: {:?}, {:?})",
                    entry.turn,
                    result.replayed_move.as_str(),
                    result.replayed_score,
                    result.replayed_safety,
                    result.tier
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (score: {:?}, safety: {:?}, {:?})",
                    entry.turn,
                    original_move.as_str(),
                    result.replayed_move.as_str(),
                    result.replayed_score,
                    result.replayed_safety,
                    result.tier
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries, in parallel, keeping journal order in the output
    pub fn replay_all(&self, entries: &[JournalEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a journal
    pub fn replay_turns(
        &self,
        entries: &[JournalEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let selected = turn_numbers
            .iter()
            .map(|turn_num| {
                entries
                    .iter()
                    .find(|e| e.turn == *turn_num)
                    .cloned()
                    .ok_or_else(|| format!("Turn {} not found in log file", turn_num))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(self.replay_all(&selected))
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };
        let fallbacks = results
            .iter()
            .filter(|r| r.tier == SelectionTier::Fallback)
            .count();

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
            fallbacks,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Fallbacks:      {}", stats.fallbacks);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.1}µs\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (score: {:?} → {:?}, safety: {:?}, {:?})",
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed_move.as_str(),
                    result.original_score,
                    result.replayed_score,
                    result.replayed_safety,
                    result.tier
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[JournalEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}

/// Why a journaled move broke the basic movement rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    OffBoard,
    IntoNeck,
}

/// Checks a journaled move against the board edges and the snake's neck.
/// The fallback answer in a fully trapped position is exempt.
pub fn check_legality(entry: &JournalEntry) -> Result<Option<IllegalMove>, String> {
    let chosen = Direction::parse(&entry.chosen_move)?;
    if entry.tier == Some(SelectionTier::Fallback) {
        return Ok(None);
    }

    if legal_directions(&entry.board, &entry.you)
        .iter()
        .any(|(dir, _)| *dir == chosen)
    {
        return Ok(None);
    }

    let next = chosen.apply(&entry.you.head);
    if entry.you.neck() == Some(next) {
        Ok(Some(IllegalMove::IntoNeck))
    } else {
        Ok(Some(IllegalMove::OffBoard))
    }
}
