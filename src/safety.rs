// Escape-space estimate: how many open cells a destination leads into

use std::collections::{HashSet, VecDeque};

use crate::geometry::{in_bounds, neighbors_in_bounds};
use crate::hazards::HazardSet;
use crate::types::Coord;

/// Counts the open cells reachable from `start` within `max_depth` steps.
///
/// Breadth-first, so the result is exactly the number of non-hazard cells whose
/// shortest open path from `start` is at most `max_depth` long. `start` itself
/// counts as one; a hazardous or off-board `start` yields 0.
///
/// `hazards` is only read. Visited cells are tracked in a set local to the call.
pub fn flood_fill(
    start: Coord,
    hazards: &HazardSet,
    width: i32,
    height: i32,
    max_depth: usize,
) -> usize {
    if !in_bounds(start, width, height) || hazards.contains(&start) {
        return 0;
    }

    let mut visited: HashSet<Coord> = HashSet::new();
    let mut frontier: VecDeque<(Coord, usize)> = VecDeque::new();

    visited.insert(start);
    frontier.push_back((start, max_depth));

    while let Some((cell, remaining)) = frontier.pop_front() {
        if remaining == 0 {
            continue;
        }

        for next in neighbors_in_bounds(cell, width, height) {
            if hazards.contains(&next) || !visited.insert(next) {
                continue;
            }
            frontier.push_back((next, remaining - 1));
        }
    }

    visited.len()
}
