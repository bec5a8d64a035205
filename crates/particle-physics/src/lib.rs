//! # Particle Physics
//!
//! Particle state, the tuned attraction constants and the single-particle
//! integration step used by the swarm simulation.

pub mod constants;
pub mod integrator;
pub mod params;
pub mod particle;

pub use constants::*;
pub use integrator::*;
pub use params::*;
pub use particle::*;
