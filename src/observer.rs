// Observability hooks for the decision pipeline
//
// The engine never logs on its own; it reports to a DecisionObserver at three
// points: hazards computed, field computed, move chosen.

use log::{debug, info};
use parking_lot::Mutex;

use crate::engine::Decision;
use crate::field::RankMap;
use crate::hazards::HazardSet;
use crate::types::Direction;

/// Receives intermediate and final results of one decision
pub trait DecisionObserver {
    fn hazards_computed(&self, _turn: i32, _hazards: &HazardSet) {}

    fn field_computed(&self, _turn: i32, _field: &RankMap) {}

    fn move_chosen(&self, _turn: i32, _decision: &Decision) {}
}

/// Ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}

/// Reports through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl DecisionObserver for LogObserver {
    fn hazards_computed(&self, turn: i32, hazards: &HazardSet) {
        debug!("Turn {}: {} hazard cells", turn, hazards.len());
    }

    fn field_computed(&self, turn: i32, field: &RankMap) {
        if let Some((cell, rank)) = field.best_cell() {
            debug!(
                "Turn {}: field peak at ({}, {}) rank {}",
                turn, cell.x, cell.y, rank
            );
        }
    }

    fn move_chosen(&self, turn: i32, decision: &Decision) {
        match decision.chosen {
            Some(chosen) => info!(
                "MOVE {}: {} SCORE: {} SAFE: {} ({:?}, {} candidates)",
                turn,
                decision.direction.as_str(),
                chosen.rank,
                chosen.safety,
                decision.tier,
                decision.candidates.len()
            ),
            None => info!(
                "MOVE {}: No safe moves detected! Moving {}",
                turn,
                decision.direction.as_str()
            ),
        }
    }
}

/// One captured observer callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Hazards { turn: i32, count: usize },
    Field { turn: i32, peak: Option<i32> },
    Choice { turn: i32, direction: Direction },
}

/// Captures callbacks in order; shareable across threads
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }
}

impl DecisionObserver for RecordingObserver {
    fn hazards_computed(&self, turn: i32, hazards: &HazardSet) {
        self.events.lock().push(ObservedEvent::Hazards {
            turn,
            count: hazards.len(),
        });
    }

    fn field_computed(&self, turn: i32, field: &RankMap) {
        self.events.lock().push(ObservedEvent::Field {
            turn,
            peak: field.best_cell().map(|(_, rank)| rank),
        });
    }

    fn move_chosen(&self, turn: i32, decision: &Decision) {
        self.events.lock().push(ObservedEvent::Choice {
            turn,
            direction: decision.direction,
        });
    }
}
