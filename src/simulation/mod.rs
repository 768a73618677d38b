pub mod states;
pub mod params;
pub mod error;
pub mod engine;
pub mod kernel;
pub mod neighbors;
pub mod pressure;
pub mod forces;
pub mod boundary;
pub mod integrator;
pub mod scenario;
pub mod driver;
