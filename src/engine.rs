// Per-turn decision pipeline
//
// snapshot -> hazard set -> {flood fill safety, rank map} -> selection
//
// Everything built here lives for one call; nothing is shared between turns or games.

use crate::config::Config;
use crate::field::{build_rank_map, DEAD_RANK};
use crate::geometry::in_bounds;
use crate::hazards::HazardSet;
use crate::observer::DecisionObserver;
use crate::safety::flood_fill;
use crate::selector::{choose_move, SelectionTier, WeightedMove};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Full outcome of one turn's evaluation
#[derive(Debug, Clone)]
pub struct Decision {
    pub direction: Direction,
    pub tier: SelectionTier,
    /// Absent when the fallback direction was used
    pub chosen: Option<WeightedMove>,
    /// Every hazard-free legal move, in `Direction::all()` order
    pub candidates: Vec<WeightedMove>,
    pub safety_threshold: usize,
}

impl Decision {
    pub fn score(&self) -> Option<i32> {
        self.chosen.map(|m| m.rank)
    }

    pub fn safety(&self) -> Option<usize> {
        self.chosen.map(|m| m.safety)
    }
}

/// Directions that stay on the board and don't reverse into our neck
pub fn legal_directions(board: &Board, you: &Battlesnake) -> Vec<(Direction, Coord)> {
    let neck = you.neck();

    Direction::all()
        .into_iter()
        .map(|dir| (dir, dir.apply(&you.head)))
        .filter(|(_, next)| in_bounds(*next, board.width, board.height))
        .filter(|(_, next)| Some(*next) != neck)
        .collect()
}

/// Chooses this turn's direction for `you`
pub fn decide(
    board: &Board,
    you: &Battlesnake,
    turn: i32,
    config: &Config,
    observer: &dyn DecisionObserver,
) -> Direction {
    evaluate(board, you, turn, config, observer).direction
}

/// Runs the whole pipeline and returns every intermediate score of the chosen path
///
/// # Panics
/// On a board with a non-positive dimension or a snake shorter than two
/// segments. A conformant game host never sends either.
pub fn evaluate(
    board: &Board,
    you: &Battlesnake,
    turn: i32,
    config: &Config,
    observer: &dyn DecisionObserver,
) -> Decision {
    assert!(
        board.width > 0 && board.height > 0,
        "invalid board dimensions {}x{}",
        board.width,
        board.height
    );
    assert!(
        you.body.len() >= 2,
        "snake '{}' needs at least 2 body segments, got {}",
        you.id,
        you.body.len()
    );

    let hazards = HazardSet::build(board, you, &config.hazards);
    observer.hazards_computed(turn, &hazards);

    let field = build_rank_map(board, you, &hazards, &config.field);
    observer.field_computed(turn, &field);

    let max_depth = config.safety.depth_for(board.width, board.height);
    let candidates: Vec<WeightedMove> = legal_directions(board, you)
        .into_iter()
        .filter(|(_, destination)| !hazards.contains(destination))
        .map(|(direction, destination)| WeightedMove {
            direction,
            destination,
            safety: flood_fill(destination, &hazards, board.width, board.height, max_depth),
            rank: field.get(destination).unwrap_or(DEAD_RANK),
        })
        .collect();

    let safety_threshold = config.safety.threshold_for(you.len());
    let selection = choose_move(&candidates, safety_threshold);

    let decision = Decision {
        direction: selection.direction,
        tier: selection.tier,
        chosen: selection.chosen,
        candidates,
        safety_threshold,
    };
    observer.move_chosen(turn, &decision);

    decision
}
