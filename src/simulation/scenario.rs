//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario` containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - initial and current state (`System` at tick 0)
//! - active force set (`AccelSet`)
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! stepping and drawing systems, or driven directly by the headless runner.

use anyhow::{ensure, Context, Result};
use bevy::prelude::Resource;

use crate::configuration::config::{ParametersConfig, ParticlesConfig, ScenarioConfig, SingularityConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::forces::{AccelSet, StepReport};
use crate::simulation::integrator::advance;
use crate::simulation::params::{Parameters, SingularityPolicy};
use crate::simulation::states::{NVec2, Particle, System};

/// Particles on a `round(sqrt(count))`-wide grid filling the middle `area`
/// fraction of a `width` x `height` domain, row by row from the top left
pub fn grid_layout(count: usize, width: f64, height: f64, area: f64) -> Vec<NVec2> {
    let cols = ((count as f64).sqrt().round() as usize).max(1);
    let cell_w = width / cols as f64 * area;
    let cell_h = height / cols as f64 * area;
    let x0 = 0.5 * (1.0 - area) * width;
    let y0 = 0.5 * (1.0 - area) * height;

    (0..count).map(|i| {
        NVec2::new(
            (i % cols) as f64 * cell_w + x0,
            (i / cols) as f64 * cell_h + y0,
        )
    }).collect()
}

impl ParametersConfig {
    pub fn to_parameters(&self, particle_count: usize) -> Parameters {
        let singularity = match self.singularity {
            SingularityConfig::Fail => SingularityPolicy::Fail,
            SingularityConfig::Guard { epsilon } => SingularityPolicy::Guard { epsilon },
        };

        Parameters {
            particle_count,
            gravity: self.gravity,
            smoothing_radius: self.smoothing_radius,
            pressure_force_mult: self.pressure_force_mult,
            target_pressure: self.target_pressure,
            wall_restitution: self.wall_restitution,
            particle_base_size: self.particle_base_size,
            domain_width: self.domain_width,
            domain_height: self.domain_height,
            singularity,
            truncate_derivative: self.truncate_derivative,
        }
    }
}

/// Bevy resource representing a fully-initialized 2D scenario
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub initial: System, // layout restored by `reset`
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let n = cfg.particles.count();
        let parameters = cfg.parameters.to_parameters(n);
        parameters.validate().context("invalid scenario parameters")?;

        // Particles: layout -> runtime `Particle` using nalgebra vectors
        let particles: Vec<Particle> = match &cfg.particles {
            ParticlesConfig::Grid { count, area, mass } => {
                ensure!(*mass > 0.0, "grid mass must be positive, got {mass}");
                ensure!(*area > 0.0 && *area <= 1.0, "grid area must be in (0, 1], got {area}");
                grid_layout(*count, parameters.domain_width, parameters.domain_height, *area)
                    .into_iter()
                    .map(|x| Particle { x, v: NVec2::zeros(), m: *mass })
                    .collect()
            }
            ParticlesConfig::Explicit { particles } => particles.iter().enumerate().map(|(i, pc)| {
                ensure!(pc.m > 0.0, "particle {i} mass must be positive, got {}", pc.m);
                Ok(Particle {
                    x: NVec2::new(pc.x[0], pc.x[1]),
                    v: NVec2::new(pc.v[0], pc.v[1]),
                    m: pc.m,
                })
            }).collect::<Result<_>>()?,
        };

        Ok(Self::from_parts(Engine::from_config(&cfg.engine), parameters, particles))
    }

    /// Assemble a scenario around an already-built particle list
    pub fn from_parts(engine: Engine, parameters: Parameters, particles: Vec<Particle>) -> Self {
        let system = System { particles, tick: 0 };
        let forces = AccelSet::from_parameters(&parameters);

        Self {
            engine,
            parameters,
            initial: system.clone(),
            system,
            forces,
        }
    }

    /// Replace the current state with the next one
    pub fn step(&mut self) -> Result<StepReport, SimError> {
        let (next, report) = advance(&self.system, &self.forces, self.engine.neighbor_search, &self.parameters)?;
        self.system = next;
        Ok(report)
    }

    /// Back to the initial layout at tick 0
    pub fn reset(&mut self) {
        self.system = self.initial.clone();
    }
}
