//! Physics parameters for runtime tuning

use crate::constants::{ATTRACTION, DAMPING, DEAD_ZONE_RADIUS, RESTITUTION};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    /// Attraction constant `K`
    pub attraction: f64,
    /// Dead-zone radius in pixels; the integrator compares against its square
    pub dead_zone_radius: f64,
    /// Velocity multiplier applied every step
    pub damping: f64,
    /// Velocity fraction kept (and inverted) on a wall bounce
    pub restitution: f64,
}

impl PhysicsParams {
    #[inline]
    pub fn dead_zone_sq(&self) -> f64 {
        self.dead_zone_radius * self.dead_zone_radius
    }
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            attraction: ATTRACTION,
            dead_zone_radius: DEAD_ZONE_RADIUS,
            damping: DAMPING,
            restitution: RESTITUTION,
        }
    }
}
