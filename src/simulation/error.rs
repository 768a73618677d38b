//! Error kinds raised by a simulation step or by parameter validation

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Local pressure too small to divide the pressure force by
    DegeneratePressure { index: usize, pressure: f64 },
    /// Two predicted positions coincide, so the pair has no direction
    CoincidentParticles { i: usize, j: usize },
    /// Position, velocity and mass arrays (or the configured count) disagree
    LengthMismatch { positions: usize, velocities: usize, masses: usize, expected: usize },
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DegeneratePressure { index, pressure } => {
                write!(f, "degenerate pressure {pressure:e} at particle {index}")
            }
            SimError::CoincidentParticles { i, j } => {
                write!(f, "particles {i} and {j} coincide")
            }
            SimError::LengthMismatch { positions, velocities, masses, expected } => write!(
                f,
                "array lengths differ: {positions} positions, {velocities} velocities, {masses} masses, expected {expected}"
            ),
            SimError::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for parameter `{name}`")
            }
        }
    }
}

impl std::error::Error for SimError {}
