//! Tuned constants for the swarm simulation
//!
//! The attraction law is a heuristic, not real gravity. The values below are the
//! widened single-precision literals the swarm was tuned with, so
//! trajectories stay close to what the tuning was done against.

/// Attraction constant `K` in `f = K / dist²`
pub const ATTRACTION: f64 = 16.673_847_198_486_328;

/// Radius around the target inside which no force is applied (pixels)
pub const DEAD_ZONE_RADIUS: f64 = 20.0;

/// Per-step velocity multiplier (simulated drag)
pub const DAMPING: f64 = 0.997_500_002_384_185_8;

/// Fraction of velocity kept after bouncing off a wall
pub const RESTITUTION: f64 = 0.5;

/// Default particle population
pub const PARTICLE_COUNT: usize = 1_000_000;

/// LightSalmon, fully opaque
pub const PARTICLE_COLOR: u32 = 0xFFFF_A07A;

/// Opaque black
pub const BACKGROUND_COLOR: u32 = 0xFF00_0000;
