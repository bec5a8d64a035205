//! Single-particle integration step
//!
//! Pure function of the particle, a target snapshot and the area bounds. Called
//! from the parallel physics fan-out, one disjoint range per worker.

use glam::IVec2;

use crate::params::PhysicsParams;
use crate::particle::Particle;

/// Attraction factor for a squared distance
///
/// Zero inside the dead zone, which also keeps `dist_sq == 0` from dividing.
#[inline]
pub fn attraction_factor(dist_sq: f64, params: &PhysicsParams) -> f64 {
    if dist_sq >= params.dead_zone_sq() {
        params.attraction / dist_sq
    } else {
        0.0
    }
}

/// Advance one particle by one step toward `target`, bouncing off `area`.
#[inline]
pub fn step(particle: &mut Particle, target: IVec2, area: IVec2, params: &PhysicsParams) {
    let px = particle.x as f64;
    let py = particle.y as f64;
    let tx = target.x as f64;
    let ty = target.y as f64;

    let dx = px - tx;
    let dy = py - ty;
    let f = attraction_factor(dx * dx + dy * dy, params);

    let ax = (tx - px) * f;
    let ay = (ty - py) * f;

    particle.xv *= params.damping;
    particle.yv *= params.damping;
    particle.xv += ax;
    particle.yv += ay;

    // `as` truncates toward zero; the fraction stays in the velocity
    particle.x = particle.x.saturating_add(particle.xv as i32);
    particle.y = particle.y.saturating_add(particle.yv as i32);

    if reflect(&mut particle.x, area.x) {
        particle.xv = -particle.xv * params.restitution;
    }
    if reflect(&mut particle.y, area.y) {
        particle.yv = -particle.yv * params.restitution;
    }
}

/// Mirror `pos` back into `[0, extent)`. Returns whether the axis bounced.
#[inline]
fn reflect(pos: &mut i32, extent: i32) -> bool {
    let reflected = if *pos >= extent {
        extent.saturating_sub(pos.saturating_sub(extent)).saturating_sub(1)
    } else if *pos < 0 {
        pos.saturating_neg()
    } else {
        return false;
    };

    // A displacement larger than the whole area still overshoots after mirroring
    *pos = reflected.clamp(0, extent - 1);
    true
}
