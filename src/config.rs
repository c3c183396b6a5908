// Configuration module for reading Snake.toml
// Every tuning knob of the decision pipeline lives here, nothing is hardcoded in the engine

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::geometry::DistanceMetric;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub hazards: HazardConfig,
    pub safety: SafetyConfig,
    pub field: FieldConfig,
    pub debug: DebugConfig,
}

/// Response time budget imposed by the game host
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Hazard map policy knobs
#[derive(Debug, Deserialize, Clone)]
pub struct HazardConfig {
    /// Our tail vacates this turn unless we just ate
    pub own_tail_is_safe: bool,
    /// Treat every cell next to an opponent head as lethal
    pub predict_opponent_moves: bool,
}

/// Flood fill settings
#[derive(Debug, Deserialize, Clone)]
pub struct SafetyConfig {
    /// Flood fill depth cap; the board area when absent
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Moves need at least `length - threshold_offset` reachable cells to count as safe
    pub threshold_offset: usize,
}

impl SafetyConfig {
    pub fn depth_for(&self, width: i32, height: i32) -> usize {
        self.max_depth
            .unwrap_or((width.max(0) * height.max(0)) as usize)
    }

    pub fn threshold_for(&self, length: usize) -> usize {
        length.saturating_sub(self.threshold_offset)
    }
}

/// Which food items feed the potential field
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodTargets {
    Nearest,
    All,
}

/// Potential field weights
#[derive(Debug, Deserialize, Clone)]
pub struct FieldConfig {
    pub distance_metric: DistanceMetric,
    /// Cells at or beyond this distance from a source get nothing from it
    pub radius: i32,
    pub head_weight: i32,
    pub food_weight: i32,
    pub food_targets: FoodTargets,

    // Opponents shorter than us
    pub hunt_weight: i32,
    pub kill_bonus: i32,

    // Opponents as long as or longer than us
    pub threat_weight: i32,
    pub head_to_head_penalty: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 500,
                network_overhead_ms: 100,
            },
            hazards: HazardConfig {
                own_tail_is_safe: false,
                predict_opponent_moves: true,
            },
            safety: SafetyConfig {
                max_depth: None,
                threshold_offset: 1,
            },
            field: FieldConfig {
                distance_metric: DistanceMetric::Manhattan,
                radius: 10,
                head_weight: 1,
                food_weight: 2,
                food_targets: FoodTargets::Nearest,
                hunt_weight: 1,
                kill_bonus: 20,
                threat_weight: 1,
                head_to_head_penalty: 100,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_hardcoded()
    }
}
