// Hazard map: every cell that would kill us if entered this turn

use std::collections::HashSet;

use crate::config::HazardConfig;
use crate::geometry::{in_bounds, neighbors_in_bounds};
use crate::types::{Battlesnake, Board, Coord};

/// Cells lethal to enter this turn. Built once per turn and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct HazardSet {
    cells: HashSet<Coord>,
}

impl HazardSet {
    /// Builds the hazard set for `you` on `board`.
    ///
    /// Includes every snake body (own tail optionally excluded), every opponent
    /// head, and, with `predict_opponent_moves`, each cell an opponent head could
    /// step into next turn regardless of relative length. Off-board cells are
    /// never inserted.
    pub fn build(board: &Board, you: &Battlesnake, config: &HazardConfig) -> Self {
        let mut hazards = HazardSet::default();

        // `board.snakes` normally contains us too; don't rely on it
        let own_listed = board.snakes.iter().any(|s| s.id == you.id);
        let own = (!own_listed).then_some(you);

        for snake in board.snakes.iter().chain(own) {
            let is_you = snake.id == you.id;
            let occupied = if is_you && config.own_tail_is_safe {
                &snake.body[..snake.body.len().saturating_sub(1)]
            } else {
                &snake.body[..]
            };

            for &segment in occupied {
                hazards.insert(segment, board);
            }

            if is_you {
                continue;
            }

            hazards.insert(snake.head, board);

            if config.predict_opponent_moves && snake.head != you.head {
                for next in neighbors_in_bounds(snake.head, board.width, board.height) {
                    hazards.cells.insert(next);
                }
            }
        }

        hazards
    }

    fn insert(&mut self, cell: Coord, board: &Board) {
        if in_bounds(cell, board.width, board.height) {
            self.cells.insert(cell);
        }
    }

    pub fn contains(&self, cell: &Coord) -> bool {
        self.cells.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.cells.iter()
    }
}

impl FromIterator<Coord> for HazardSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        HazardSet {
            cells: iter.into_iter().collect(),
        }
    }
}
