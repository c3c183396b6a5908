// Battlesnake bot: binds the API lifecycle to the decision engine
//
// The engine is a pure function of the snapshot; this layer owns the time
// budget, the appearance metadata and the decision journal.

use log::{error, info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::{DebugLogger, JournalEntry};
use crate::engine;
use crate::observer::LogObserver;
use crate::selector::FALLBACK_DIRECTION;
use crate::types::{Battlesnake, Board, Direction, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    journal: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no journal
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            journal: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that journals every decision to `journal`
    pub fn with_journal(config: Config, journal: DebugLogger) -> Self {
        Bot { config, journal }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "fieldsnake",
            "color": "#0178D6",
            "head": "earmuffs",
            "tail": "pixel",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes)",
            game.id,
            board.width,
            board.height,
            board.snakes.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on tokio's blocking pool. If it does not finish within
    /// the effective time budget, or panics, the fallback direction is sent so
    /// the host always gets an answer.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let direction = self.choose(game, *turn, board, you).await;
        json!({ "move": direction.as_str() })
    }

    async fn choose(&self, game: &Game, turn: i32, board: &Board, you: &Battlesnake) -> Direction {
        let start_time = Instant::now();

        let task_board = board.clone();
        let task_you = you.clone();
        let config = self.config.clone();

        let task = tokio::task::spawn_blocking(move || {
            engine::evaluate(&task_board, &task_you, turn, &config, &LogObserver)
        });

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());

        match tokio::time::timeout(budget, task).await {
            Ok(Ok(decision)) => {
                info!(
                    "Turn {}: Chose {} in {}ms",
                    turn,
                    decision.direction.as_str(),
                    start_time.elapsed().as_millis()
                );
                if self.journal.is_enabled() {
                    self.journal.log_decision(JournalEntry::new(
                        &game.id,
                        turn,
                        board.clone(),
                        you.clone(),
                        &decision,
                    ));
                }
                decision.direction
            }
            Ok(Err(e)) => {
                error!("Turn {}: decision task failed: {}", turn, e);
                FALLBACK_DIRECTION
            }
            Err(_) => {
                warn!(
                    "Turn {}: no decision within {}ms, answering {}",
                    turn,
                    budget.as_millis(),
                    FALLBACK_DIRECTION.as_str()
                );
                FALLBACK_DIRECTION
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;
    use serde_json::Value;
    use std::collections::HashMap;

    fn game() -> Game {
        Game {
            id: "test-game".to_string(),
            ruleset: HashMap::new(),
            timeout: 500,
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_info_advertises_api_v1() {
        let bot = Bot::new(Config::default_hardcoded());
        let info = bot.info();
        assert_eq!(info["apiversion"], Value::from("1"));
        assert!(info["color"].as_str().unwrap().starts_with('#'));
    }

    #[tokio::test]
    async fn test_get_move_returns_move_field() {
        let bot = Bot::new(Config::default_hardcoded());
        let body = vec![Coord::new(5, 5), Coord::new(5, 4)];
        let you = Battlesnake {
            id: "you".to_string(),
            name: "you".to_string(),
            health: 100,
            head: body[0],
            length: 2,
            body,
            latency: "0".to_string(),
            shout: None,
        };
        let board = Board {
            width: 11,
            height: 11,
            food: vec![Coord::new(5, 8)],
            snakes: vec![you.clone()],
            hazards: vec![],
        };

        let response = bot.get_move(&game(), &0, &board, &you).await;
        assert_eq!(response["move"], Value::from("up"));
    }

    #[tokio::test]
    async fn test_zero_budget_answers_fallback_or_decision() {
        let mut config = Config::default_hardcoded();
        config.timing.response_time_budget_ms = 0;
        let bot = Bot::new(config);
        let body = vec![Coord::new(0, 5), Coord::new(1, 5)];
        let you = Battlesnake {
            id: "you".to_string(),
            name: "you".to_string(),
            health: 100,
            head: body[0],
            length: 2,
            body,
            latency: "0".to_string(),
            shout: None,
        };
        let board = Board {
            width: 11,
            height: 11,
            food: vec![],
            snakes: vec![you.clone()],
            hazards: vec![],
        };

        let response = bot.get_move(&game(), &0, &board, &you).await;
        let chosen = response["move"].as_str().unwrap();
        // Either the task won the race or the timeout did
        assert!(["up", "down"].contains(&chosen), "got {}", chosen);
    }
}
