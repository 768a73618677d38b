//! Rectangular walls at `0` and `extent` on each axis.
//!
//! A particle touches a wall when its centre is closer than its display
//! radius. It is clamped back once per step (no re-resolution) and its
//! velocity component is reversed and scaled by the restitution.

use super::params::Parameters;
use super::states::{display_radius, NVec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walls {
    pub extent: NVec2, // (width, height)
    pub restitution: f64,
    pub base_size: f64,
}

impl Walls {
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            extent: NVec2::new(params.domain_width, params.domain_height),
            restitution: params.wall_restitution,
            base_size: params.particle_base_size,
        }
    }

    /// Clamp `x` inside the walls and reflect `v` on every axis that hit one.
    /// Returns true if any wall was hit.
    pub fn resolve(&self, x: &mut NVec2, v: &mut NVec2, m: f64) -> bool {
        let r = display_radius(m, self.base_size);
        let mut hit = false;

        for axis in 0..2 {
            let high = self.extent[axis] - r;
            if x[axis] < r {
                x[axis] = r;
                v[axis] *= -self.restitution;
                hit = true;
            } else if x[axis] > high {
                x[axis] = high;
                v[axis] *= -self.restitution;
                hit = true;
            }
        }

        hit
    }
}
