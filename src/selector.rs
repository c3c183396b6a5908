// Move selection: reconcile escape space against field rank

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::types::{Coord, Direction};

/// Direction answered when no candidate move exists at all
pub const FALLBACK_DIRECTION: Direction = Direction::Down;

/// One evaluated candidate move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightedMove {
    pub direction: Direction,
    pub destination: Coord,
    pub safety: usize,
    pub rank: i32,
}

/// Which rule produced the final choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionTier {
    /// Best rank among moves meeting the safety threshold
    Safe,
    /// Nothing met the threshold, most open space wins
    Safest,
    /// No candidate at all
    Fallback,
}

/// Outcome of the selection step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub direction: Direction,
    pub tier: SelectionTier,
    pub chosen: Option<WeightedMove>,
}

/// Picks a move from `candidates`, which must be in `Direction::all()` order.
///
/// Moves reaching at least `safety_threshold` cells compete on rank, then safety.
/// If none qualify the safest move wins. Remaining ties go to the earliest
/// candidate. An empty list answers `FALLBACK_DIRECTION`.
pub fn choose_move(candidates: &[WeightedMove], safety_threshold: usize) -> Selection {
    let best_safe = candidates
        .iter()
        .filter(|m| m.safety >= safety_threshold)
        .min_by_key(|m| (Reverse(m.rank), Reverse(m.safety)));

    if let Some(chosen) = best_safe {
        return Selection {
            direction: chosen.direction,
            tier: SelectionTier::Safe,
            chosen: Some(*chosen),
        };
    }

    match candidates.iter().min_by_key(|m| Reverse(m.safety)) {
        Some(chosen) => Selection {
            direction: chosen.direction,
            tier: SelectionTier::Safest,
            chosen: Some(*chosen),
        },
        None => Selection {
            direction: FALLBACK_DIRECTION,
            tier: SelectionTier::Fallback,
            chosen: None,
        },
    }
}
