//! Planner configuration.
//!
//! All tunables live here so a deployment can load them from a TOML file;
//! every field has a serde default, so an empty file yields the reference
//! configuration (20×20 arena geometry, 10-unit move quantum).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

mod defaults {
    pub fn clearance() -> i32 {
        2
    }
    pub fn straight_cost() -> u32 {
        10
    }
    pub fn normal_turn_cost() -> u32 {
        40
    }
    pub fn wide_turn_cost() -> u32 {
        60
    }
    pub fn max_nodes() -> usize {
        100_000
    }
    pub fn max_waypoints() -> usize {
        15
    }
}

/// Move cost settings.
///
/// Costs are integer distance units. The heuristic search assumes every
/// move costs at least `straight` per cell of Chebyshev advance, so turn
/// costs must stay at or above `straight` times the cells a turn sweeps
/// (3 for normal geometry, 4 for wide) for the estimate to stay admissible.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CostSettings {
    /// Cost of one straight move (forward or backward), one cell.
    #[serde(default = "defaults::straight_cost")]
    pub straight: u32,

    /// Cost of a 90° turn in normal geometry.
    #[serde(default = "defaults::normal_turn_cost")]
    pub normal_turn: u32,

    /// Cost of a 90° turn in wide geometry.
    #[serde(default = "defaults::wide_turn_cost")]
    pub wide_turn: u32,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            straight: defaults::straight_cost(),
            normal_turn: defaults::normal_turn_cost(),
            wide_turn: defaults::wide_turn_cost(),
        }
    }
}

/// Search engine settings.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Maximum nodes a single point-to-point search may expand.
    #[serde(default = "defaults::max_nodes")]
    pub max_nodes: usize,

    /// Maximum viewpoints the route optimizer accepts. The subset DP is
    /// O(2^n · n²); this is a hard ceiling, not a soft hint.
    #[serde(default = "defaults::max_waypoints")]
    pub max_waypoints: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_nodes: defaults::max_nodes(),
            max_waypoints: defaults::max_waypoints(),
        }
    }
}

/// Top-level planner configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Chebyshev margin (cells) kept around every obstacle, and the
    /// distance at which a viewpoint sits from its obstacle.
    #[serde(default = "defaults::clearance")]
    pub clearance: i32,

    #[serde(default)]
    pub costs: CostSettings,

    #[serde(default)]
    pub search: SearchSettings,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            clearance: defaults::clearance(),
            costs: CostSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PlannerConfig = toml::from_str(&text)?;
        Ok(config)
    }
}
