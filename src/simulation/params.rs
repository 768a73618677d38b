//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the settings fixed for a run:
//! - gravity, smoothing radius, pressure multiplier and target pressure,
//! - wall restitution and particle base size (collision extent),
//! - domain size,
//! - how singular divisions are handled (`SingularityPolicy`)

use super::error::SimError;

/// What to do when a division in the force term would be by (near) zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SingularityPolicy {
    /// Abort the step with `SimError` when a denominator is exactly zero
    Fail,
    /// Drop the offending contribution when a denominator is `<= epsilon`
    Guard { epsilon: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub particle_count: usize,
    pub gravity: f64, // vertical acceleration per step
    pub smoothing_radius: f64, // kernel support h
    pub pressure_force_mult: f64,
    pub target_pressure: f64,
    pub wall_restitution: f64, // in [0, 1)
    pub particle_base_size: f64, // display radius scale
    pub domain_width: f64,
    pub domain_height: f64,
    pub singularity: SingularityPolicy,
    pub truncate_derivative: bool, // zero kernel derivative beyond h
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            particle_count: 70,
            gravity: 0.01,
            smoothing_radius: 30.0,
            pressure_force_mult: 0.1,
            target_pressure: 0.1,
            wall_restitution: 0.7,
            particle_base_size: 5.0,
            domain_width: 400.0,
            domain_height: 400.0,
            singularity: SingularityPolicy::Fail,
            truncate_derivative: false,
        }
    }
}

impl Parameters {
    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), SimError> {
        fn check(ok: bool, name: &'static str, value: f64) -> Result<(), SimError> {
            if ok {
                Ok(())
            } else {
                Err(SimError::InvalidParameter { name, value })
            }
        }

        check(self.particle_count > 0, "particle_count", self.particle_count as f64)?;
        check(self.gravity.is_finite(), "gravity", self.gravity)?;
        check(self.smoothing_radius > 0.0 && self.smoothing_radius.is_finite(), "smoothing_radius", self.smoothing_radius)?;
        check(self.pressure_force_mult.is_finite(), "pressure_force_mult", self.pressure_force_mult)?;
        check(self.target_pressure.is_finite(), "target_pressure", self.target_pressure)?;
        check((0.0..1.0).contains(&self.wall_restitution), "wall_restitution", self.wall_restitution)?;
        check(self.particle_base_size >= 0.0 && self.particle_base_size.is_finite(), "particle_base_size", self.particle_base_size)?;
        check(self.domain_width > 0.0 && self.domain_width.is_finite(), "domain_width", self.domain_width)?;
        check(self.domain_height > 0.0 && self.domain_height.is_finite(), "domain_height", self.domain_height)?;
        if let SingularityPolicy::Guard { epsilon } = self.singularity {
            check(epsilon >= 0.0 && epsilon.is_finite(), "singularity.epsilon", epsilon)?;
        }

        Ok(())
    }
}
