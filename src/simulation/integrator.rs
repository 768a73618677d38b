//! Fixed-step integrator for the particle system
//!
//! One step:
//! 1. predicted positions `x* = x + v` (frozen for the whole step)
//! 2. accelerations `a` from `AccelSet` over the predicted snapshot
//! 3. `v' = v + a`, `x' = x* + v'`
//! 4. wall collisions via [`Walls`]
//!
//! The input is never mutated; a fresh state is returned.

use log::trace;

use super::boundary::Walls;
use super::error::SimError;
use super::forces::{AccelSet, ForceContext, StepReport};
use super::neighbors::NeighborSearchKind;
use super::params::Parameters;
use super::states::{predict_positions, NVec2, Particle, Snapshot, System};

/// New velocities and positions produced by one [`step`]
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub velocities: Vec<NVec2>,
    pub positions: Vec<NVec2>,
    pub report: StepReport,
}

/// Advance index-aligned arrays by one step with gravity + pressure forces
/// and a brute-force neighbour scan
pub fn step(velocities: &[NVec2], positions: &[NVec2], masses: &[f64], params: &Parameters) -> Result<StepOutput, SimError> {
    let forces = AccelSet::from_parameters(params);
    step_with(velocities, positions, masses, &forces, NeighborSearchKind::BruteForce, params)
}

/// Same as [`step`] with a caller-chosen force set and neighbour search
pub fn step_with(
    velocities: &[NVec2],
    positions: &[NVec2],
    masses: &[f64],
    forces: &AccelSet,
    search: NeighborSearchKind,
    params: &Parameters,
) -> Result<StepOutput, SimError> {
    let n = positions.len();
    if velocities.len() != n || masses.len() != n || params.particle_count != n {
        return Err(SimError::LengthMismatch {
            positions: n,
            velocities: velocities.len(),
            masses: masses.len(),
            expected: params.particle_count,
        });
    }

    // x* = x + v, read-only from here on
    let predicted = predict_positions(positions, velocities);
    let neighbors = search.build(&predicted);
    let ctx = ForceContext {
        snapshot: Snapshot { positions: &predicted, masses },
        search: &*neighbors,
    };

    // All accelerations before any particle moves
    let mut accels = vec![NVec2::zeros(); n];
    let mut report = StepReport::default();
    forces.accumulate_accels(&ctx, &mut accels, &mut report)?;

    let walls = Walls::from_parameters(params);
    let mut new_velocities = Vec::with_capacity(n);
    let mut new_positions = Vec::with_capacity(n);

    for i in 0..n {
        let mut v = velocities[i] + accels[i];
        let mut x = predicted[i] + v;
        if walls.resolve(&mut x, &mut v, masses[i]) {
            trace!("particle {i} hit a wall at ({:.3}, {:.3})", x.x, x.y);
        }
        new_velocities.push(v);
        new_positions.push(x);
    }

    Ok(StepOutput {
        velocities: new_velocities,
        positions: new_positions,
        report,
    })
}

/// Advance a whole [`System`] by one step, returning the next state
/// with `tick` incremented
pub fn advance(sys: &System, forces: &AccelSet, search: NeighborSearchKind, params: &Parameters) -> Result<(System, StepReport), SimError> {
    let masses = sys.masses();
    let out = step_with(&sys.velocities(), &sys.positions(), &masses, forces, search, params)?;

    let particles = out.positions.into_iter()
        .zip(out.velocities)
        .zip(masses)
        .map(|((x, v), m)| Particle { x, v, m })
        .collect();

    let next = System {
        particles,
        tick: sys.tick + 1,
    };

    Ok((next, out.report))
}
