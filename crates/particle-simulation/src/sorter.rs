//! Periodic spatial sort
//!
//! Reordering particles by screen row keeps neighbouring writes close in the
//! framebuffer during rendering. It does not change the physics.

use std::cmp::Ordering;

use particle_physics::Particle;

use crate::config::SORT_INTERVAL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicSorter {
    interval: u64,
}

impl Default for PeriodicSorter {
    fn default() -> Self {
        Self::new(SORT_INTERVAL)
    }
}

impl PeriodicSorter {
    /// `interval` must be non-zero.
    pub fn new(interval: u64) -> Self {
        debug_assert!(interval > 0);
        Self { interval }
    }

    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Whether the pass numbered `pass` (counted before it runs) should sort first.
    #[inline]
    pub fn is_due(&self, pass: u64) -> bool {
        pass % self.interval == 0
    }

    /// Stable sort by `(y, x)` ascending.
    pub fn sort(&self, particles: &mut [Particle]) {
        particles.sort_by(screen_order);
    }
}

fn screen_order(a: &Particle, b: &Particle) -> Ordering {
    a.y.cmp(&b.y).then(a.x.cmp(&b.x))
}

pub fn is_screen_ordered(particles: &[Particle]) -> bool {
    particles
        .windows(2)
        .all(|w| screen_order(&w[0], &w[1]) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_row_then_column() {
        let mut particles = vec![
            Particle::at(5, 1),
            Particle::at(3, 0),
            Particle::at(1, 1),
            Particle::at(9, 0),
        ];
        PeriodicSorter::default().sort(&mut particles);

        let positions: Vec<_> = particles.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(positions, vec![(3, 0), (9, 0), (1, 1), (5, 1)]);
        assert!(is_screen_ordered(&particles));
    }

    #[test]
    fn equal_positions_keep_their_order() {
        let mut particles = vec![
            Particle::at(2, 2).with_velocity(1.0, 0.0),
            Particle::at(0, 0),
            Particle::at(2, 2).with_velocity(2.0, 0.0),
            Particle::at(2, 2).with_velocity(3.0, 0.0),
        ];
        PeriodicSorter::default().sort(&mut particles);

        let tied: Vec<_> = particles[1..].iter().map(|p| p.xv).collect();
        assert_eq!(tied, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn due_on_interval_boundaries() {
        let sorter = PeriodicSorter::new(5000);
        assert!(sorter.is_due(0));
        assert!(!sorter.is_due(1));
        assert!(!sorter.is_due(4999));
        assert!(sorter.is_due(5000));
        assert!(sorter.is_due(10_000));
    }
}
