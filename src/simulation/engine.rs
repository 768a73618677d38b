//! High-level runtime engine settings
//!
//! Selects viewer or headless mode, the headless step count, the neighbour
//! search and how the driver recovers from a broken state.

use crate::configuration::config::{EngineConfig, NeighborSearchConfig};
use crate::simulation::neighbors::NeighborSearchKind;

/// Headless step count when none is configured
pub const DEFAULT_STEPS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub viewer: bool, // false = headless
    pub steps: u64, // headless step count
    pub neighbor_search: NeighborSearchKind,
    pub reset_on_non_finite: bool, // reset to the initial layout instead of stopping
}

impl Default for Engine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Engine {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        let neighbor_search = match cfg.neighbor_search {
            NeighborSearchConfig::BruteForce => NeighborSearchKind::BruteForce,
        };

        Self {
            viewer: cfg.viewer,
            steps: cfg.steps.unwrap_or(DEFAULT_STEPS),
            neighbor_search,
            reset_on_non_finite: cfg.reset_on_non_finite,
        }
    }
}
