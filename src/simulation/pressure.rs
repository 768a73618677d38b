//! Pressure-like scalar field interpolated from particle masses
//!
//! `pressure(p) = sum_i kernel(|p - x_i|) * m_i`, including the particle
//! sitting at `p` itself. Summation runs in index order.

use super::kernel::SmoothingKernel;
use super::neighbors::NeighborSearch;
use super::states::{NVec2, Snapshot};

pub struct PressureField<'a> {
    kernel: SmoothingKernel,
    snapshot: Snapshot<'a>,
    search: &'a dyn NeighborSearch,
}

impl<'a> PressureField<'a> {
    pub fn new(kernel: SmoothingKernel, snapshot: Snapshot<'a>, search: &'a dyn NeighborSearch) -> Self {
        Self { kernel, snapshot, search }
    }

    /// Estimated pressure at an arbitrary point
    pub fn pressure(&self, point: &NVec2) -> f64 {
        let mut pressure = 0.0;
        for j in self.search.query_neighbors(point, self.kernel.h) {
            let d = (point - self.snapshot.positions[j]).norm();
            pressure += self.kernel.kernel(d) * self.snapshot.masses[j];
        }
        pressure
    }

    /// Row-major samples of the field on a regular grid covering
    /// `[0, width) x [0, height)`, one sample every `spacing` units
    pub fn sample_grid(&self, width: f64, height: f64, spacing: f64) -> Vec<Vec<f64>> {
        if spacing <= 0.0 {
            return Vec::new();
        }
        let cols = (width / spacing).ceil() as usize;
        let rows = (height / spacing).ceil() as usize;

        (0..rows).map(|r| {
            (0..cols).map(|c| {
                let point = NVec2::new(c as f64 * spacing, r as f64 * spacing);
                self.pressure(&point)
            }).collect()
        }).collect()
    }
}

/// Pressure at `point` from a brute-force scan of `positions`
pub fn pressure_at(kernel: &SmoothingKernel, point: &NVec2, positions: &[NVec2], masses: &[f64]) -> f64 {
    let search = super::neighbors::AllParticles::new(positions);
    let snapshot = Snapshot { positions, masses };
    PressureField::new(*kernel, snapshot, &search).pressure(point)
}
