//! Core state types for the particle simulation.
//!
//! - `Particle` holds position, velocity and mass using `NVec2`
//! - `System` is the index-aligned collection of particles plus the tick counter
//!
//! Index `i` always refers to the same particle for the whole run.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
}

impl Particle {
    /// Radius used for wall collisions (and drawing): `m^(1/3) * base_size`
    pub fn display_radius(&self, base_size: f64) -> f64 {
        display_radius(self.m, base_size)
    }
}

pub fn display_radius(m: f64, base_size: f64) -> f64 {
    m.powf(1.0 / 3.0) * base_size
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub particles: Vec<Particle>, // 2d collection of particles
    pub tick: u64, // number of steps taken
}

impl System {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> Vec<NVec2> {
        self.particles.iter().map(|p| p.x).collect()
    }

    pub fn velocities(&self) -> Vec<NVec2> {
        self.particles.iter().map(|p| p.v).collect()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.m).collect()
    }

    /// False once any position or velocity component became NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.particles.iter().all(|p| {
            p.x.iter().chain(p.v.iter()).all(|c| c.is_finite())
        })
    }
}

/// Read-only view of the predicted positions and masses for one step.
/// Every force term sees the same snapshot, so accelerations do not depend
/// on the order particles are visited in.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub positions: &'a [NVec2],
    pub masses: &'a [f64],
}

/// x + v for every particle
pub fn predict_positions(positions: &[NVec2], velocities: &[NVec2]) -> Vec<NVec2> {
    positions.iter().zip(velocities).map(|(x, v)| x + v).collect()
}
