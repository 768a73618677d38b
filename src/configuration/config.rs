//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – driver options (viewer or headless, step count, recovery)
//! - [`ParametersConfig`] – physical constants and the singularity policy
//! - [`ParticlesConfig`]  – initial layout (grid or explicit list)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   viewer: true              # false -> run headless
//!   steps: 2000               # headless step count
//!   neighbor_search: brute_force
//!   reset_on_non_finite: true
//!
//! parameters:
//!   gravity: 0.01
//!   smoothing_radius: 30.0
//!   pressure_force_mult: 0.1
//!   target_pressure: 0.1
//!   wall_restitution: 0.7
//!   particle_base_size: 5.0
//!   domain_width: 400.0
//!   domain_height: 400.0
//!   singularity:
//!     policy: guard           # or "fail"
//!     epsilon: 1.0e-12
//!   truncate_derivative: false
//!
//! particles:
//!   layout: grid              # or "explicit" with a `particles` list
//!   count: 70
//!   area: 0.5
//!   mass: 1.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Neighbour search backend
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighborSearchConfig {
    #[default]
    #[serde(rename = "brute_force")] // scan every particle, O(N) per query
    BruteForce,
}

/// Driver-level configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_true")]
    pub viewer: bool, // `true` - open the Bevy window, `false` - run headless
    #[serde(default)]
    pub steps: Option<u64>, // number of headless steps
    #[serde(default)]
    pub neighbor_search: NeighborSearchConfig,
    #[serde(default = "default_true")]
    pub reset_on_non_finite: bool, // restart from the initial layout on NaN/inf or a failed step
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewer: true,
            steps: None,
            neighbor_search: NeighborSearchConfig::default(),
            reset_on_non_finite: true,
        }
    }
}

/// Handling of zero denominators in the pressure force
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SingularityConfig {
    #[default]
    Fail,
    Guard { epsilon: f64 },
}

/// Physical parameters of a run
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub gravity: f64, // vertical acceleration per step, +y is down
    pub smoothing_radius: f64, // kernel support radius h
    pub pressure_force_mult: f64,
    pub target_pressure: f64,
    pub wall_restitution: f64, // velocity kept after a wall bounce, [0, 1)
    pub particle_base_size: f64, // display radius of a unit mass
    pub domain_width: f64,
    pub domain_height: f64,
    #[serde(default)]
    pub singularity: SingularityConfig,
    #[serde(default)]
    pub truncate_derivative: bool,
}

/// Initial state of one particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: [f64; 2], // position
    #[serde(default)]
    pub v: [f64; 2], // velocity
    pub m: f64, // mass
}

/// Initial particle layout
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ParticlesConfig {
    /// `count` particles on a square grid in the middle `area` of the domain
    Grid {
        count: usize,
        #[serde(default = "default_area")]
        area: f64,
        #[serde(default = "default_mass")]
        mass: f64,
    },
    Explicit {
        particles: Vec<ParticleConfig>,
    },
}

impl ParticlesConfig {
    pub fn count(&self) -> usize {
        match self {
            ParticlesConfig::Grid { count, .. } => *count,
            ParticlesConfig::Explicit { particles } => particles.len(),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub particles: ParticlesConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("failed to parse scenario YAML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }
}

fn default_true() -> bool {
    true
}

fn default_area() -> f64 {
    0.5
}

fn default_mass() -> f64 {
    1.0
}
