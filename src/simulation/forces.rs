//! Acceleration contributors for the particle stepper
//!
//! Every term reads the same frozen `Snapshot` of predicted positions and
//! adds its share into `out[i]`. Nothing is integrated until all terms ran
//! for all particles.

use log::debug;

use super::error::SimError;
use super::kernel::SmoothingKernel;
use super::neighbors::NeighborSearch;
use super::params::{Parameters, SingularityPolicy};
use super::pressure::PressureField;
use super::states::{NVec2, Snapshot};

/// Counts of contributions dropped by `SingularityPolicy::Guard` in one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub guarded_pairs: usize, // pairs closer than epsilon, no force
    pub guarded_particles: usize, // pressure below epsilon, gravity only
}

impl StepReport {
    pub fn is_clean(&self) -> bool {
        self.guarded_pairs == 0 && self.guarded_particles == 0
    }
}

/// Everything a term may read during a step
pub struct ForceContext<'a> {
    pub snapshot: Snapshot<'a>,
    pub search: &'a dyn NeighborSearch,
}

/// Trait for acceleration sources operating on a [`Snapshot`]
/// Implementations add their contribution into `out[i]` for each particle
pub trait Acceleration {
    fn acceleration(&self, ctx: &ForceContext, out: &mut [NVec2], report: &mut StepReport) -> Result<(), SimError>;
}

/// Collection of acceleration terms summed into one vector per particle
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Gravity plus the pressure-gradient term, configured from `params`
    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new()
            .with(UniformGravity { g: params.gravity })
            .with(PressureGradient::from_parameters(params))
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations for every particle in the snapshot
    /// - `out[i]` is zeroed, then every term adds into it
    pub fn accumulate_accels(&self, ctx: &ForceContext, out: &mut [NVec2], report: &mut StepReport) -> Result<(), SimError> {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(ctx, out, report)?;
        }
        Ok(())
    }
}

/// Constant acceleration along +y (screen down)
pub struct UniformGravity {
    pub g: f64,
}

impl Acceleration for UniformGravity {
    fn acceleration(&self, _ctx: &ForceContext, out: &mut [NVec2], _report: &mut StepReport) -> Result<(), SimError> {
        for a in out.iter_mut() {
            a.y += self.g;
        }
        Ok(())
    }
}

/// Pairwise pressure force pulling the local pressure toward `target_pressure`.
///
/// For particle `i` with local pressure `p_i`:
///
/// ```text
/// F_i = sum_{j != i} (x_i - x_j)/d * W'(d) * m_j * (target - p_i) * mult
/// a_i += F_i / p_i
/// ```
///
/// The division is by the local pressure itself, not by a squared rest density.
pub struct PressureGradient {
    pub kernel: SmoothingKernel,
    pub multiplier: f64,
    pub target_pressure: f64,
    pub singularity: SingularityPolicy,
}

impl PressureGradient {
    pub fn from_parameters(params: &Parameters) -> Self {
        Self {
            kernel: SmoothingKernel {
                h: params.smoothing_radius,
                truncate: params.truncate_derivative,
            },
            multiplier: params.pressure_force_mult,
            target_pressure: params.target_pressure,
            singularity: params.singularity,
        }
    }

    fn threshold(&self) -> f64 {
        match self.singularity {
            SingularityPolicy::Fail => 0.0,
            SingularityPolicy::Guard { epsilon } => epsilon,
        }
    }
}

impl Acceleration for PressureGradient {
    fn acceleration(&self, ctx: &ForceContext, out: &mut [NVec2], report: &mut StepReport) -> Result<(), SimError> {
        let positions = ctx.snapshot.positions;
        let masses = ctx.snapshot.masses;
        let field = PressureField::new(self.kernel, ctx.snapshot, ctx.search);
        let threshold = self.threshold();

        // The untruncated derivative reaches every particle
        let reach = if self.kernel.truncate { self.kernel.h } else { f64::INFINITY };

        for (i, a) in out.iter_mut().enumerate() {
            let xi = positions[i];
            let pressure = field.pressure(&xi);
            let pressure_diff = self.target_pressure - pressure;

            let mut force = NVec2::zeros();
            for j in ctx.search.query_neighbors(&xi, reach) {
                if j == i {
                    continue;
                }
                let r = xi - positions[j];
                let d = r.norm();

                if d <= threshold {
                    match self.singularity {
                        SingularityPolicy::Fail => return Err(SimError::CoincidentParticles { i, j }),
                        SingularityPolicy::Guard { .. } => {
                            debug!("pair ({i}, {j}) at distance {d:e}, skipping");
                            report.guarded_pairs += 1;
                            continue;
                        }
                    }
                }

                let gradient = self.kernel.derivative(d) * masses[j];
                force += (r / d) * gradient * pressure_diff * self.multiplier;
            }

            if pressure.abs() <= threshold {
                match self.singularity {
                    SingularityPolicy::Fail => return Err(SimError::DegeneratePressure { index: i, pressure }),
                    SingularityPolicy::Guard { .. } => {
                        debug!("particle {i} has pressure {pressure:e}, gravity only");
                        report.guarded_particles += 1;
                        continue;
                    }
                }
            }

            *a += force / pressure;
        }

        Ok(())
    }
}
