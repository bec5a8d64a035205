//! # Particle Simulation
//!
//! Drives a particle swarm on the CPU: a fixed worker pool runs a physics
//! fan-out and a render fan-out per frame, with a periodic spatial sort in
//! between. Frames run whenever the host is idle.

pub mod config;
pub mod error;
pub mod partition;
pub mod scheduler;
pub mod session;
pub mod sorter;

pub use config::*;
pub use error::*;
pub use partition::*;
pub use scheduler::*;
pub use session::*;
pub use sorter::*;
