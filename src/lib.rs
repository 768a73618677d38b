pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, System, NVec2, Snapshot};
pub use simulation::params::{Parameters, SingularityPolicy};
pub use simulation::error::SimError;
pub use simulation::kernel::SmoothingKernel;
pub use simulation::neighbors::{NeighborSearch, AllParticles, NeighborSearchKind};
pub use simulation::pressure::{PressureField, pressure_at};
pub use simulation::forces::{Acceleration, AccelSet, UniformGravity, PressureGradient, StepReport};
pub use simulation::integrator::{step, step_with, advance, StepOutput};
pub use simulation::scenario::{Scenario, grid_layout};
pub use simulation::driver::{drive_one, run_headless, RunSummary, StepOutcome};

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, ParticlesConfig, ParticleConfig};

pub use visualization::sph_vis2d::run_2d;

pub use benchmark::benchmark::bench_step;
