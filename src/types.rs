// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    pub ruleset: HashMap<String, Value>,
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// Number of occupied cells; the API's `length` field mirrors this
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Segment directly behind the head, if any
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Option<Coord> {
        self.body.last().copied()
    }
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions in the fixed evaluation order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses an API direction label, case-insensitively
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

impl GameState {
    /// Rejects snapshots the decision engine treats as implementation faults
    pub fn validate(&self) -> Result<(), String> {
        validate_snapshot(&self.board, &self.you)
    }
}

/// Checks board dimensions and that our snake has a head and a neck
pub fn validate_snapshot(board: &Board, you: &Battlesnake) -> Result<(), String> {
    if board.width <= 0 || board.height <= 0 {
        return Err(format!(
            "Invalid board dimensions {}x{}",
            board.width, board.height
        ));
    }

    if you.body.len() < 2 {
        return Err(format!(
            "Snake '{}' has {} body segment(s), need at least 2",
            you.id,
            you.body.len()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(body: Vec<Coord>) -> Battlesnake {
        Battlesnake {
            id: "you".to_string(),
            name: "you".to_string(),
            health: 100,
            head: body.first().copied().unwrap_or(Coord::new(0, 0)),
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn board(width: i32, height: i32) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        }
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("up").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("Down").unwrap(), Direction::Down);
        assert_eq!(Direction::parse("LEFT").unwrap(), Direction::Left);
        assert_eq!(Direction::parse("right").unwrap(), Direction::Right);
        assert!(Direction::parse("sideways").is_err());
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }

    #[test]
    fn test_validate_rejects_short_body() {
        let you = snake(vec![Coord::new(1, 1)]);
        assert!(validate_snapshot(&board(11, 11), &you).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_board() {
        let you = snake(vec![Coord::new(1, 1), Coord::new(1, 0)]);
        assert!(validate_snapshot(&board(0, 11), &you).is_err());
        assert!(validate_snapshot(&board(11, -1), &you).is_err());
    }

    #[test]
    fn test_validate_accepts_fresh_snake() {
        let you = snake(vec![Coord::new(1, 1), Coord::new(1, 0)]);
        assert!(validate_snapshot(&board(11, 11), &you).is_ok());
    }

    #[test]
    fn test_game_state_deserializes_without_optional_fields() {
        let raw = r#"{
            "game": {"id": "g", "ruleset": {}, "timeout": 500},
            "turn": 3,
            "board": {"height": 7, "width": 7, "food": [], "snakes": []},
            "you": {"id": "a", "name": "a", "health": 90,
                    "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}],
                    "head": {"x": 1, "y": 1}, "length": 2}
        }"#;
        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.turn, 3);
        assert!(state.board.hazards.is_empty());
        assert_eq!(state.you.neck(), Some(Coord::new(1, 0)));
        assert!(state.validate().is_ok());
    }
}
