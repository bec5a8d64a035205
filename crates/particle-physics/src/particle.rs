//! Particle state and the arena that owns it

use std::ops::{Index, IndexMut};

use glam::IVec2;
use rand::Rng;

/// A single point particle
///
/// Position is integral screen space; velocity keeps its fractional part so that
/// slow particles still accumulate motion across steps.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub xv: f64,
    pub yv: f64,
}

impl Particle {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            xv: 0.0,
            yv: 0.0,
        }
    }

    pub fn with_velocity(mut self, xv: f64, yv: f64) -> Self {
        self.xv = xv;
        self.yv = yv;
        self
    }

    #[inline]
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }
}

/// Fixed-size particle arena
///
/// Allocated once per session; particles are never added or removed afterwards.
/// Workers receive disjoint sub-slices through [`ParticleStore::as_mut_slice`].
pub struct ParticleStore {
    particles: Vec<Particle>,
    area: IVec2,
}

impl ParticleStore {
    /// Scatter `count` particles uniformly over `[0, width) × [0, height)` at rest.
    ///
    /// `area` components must be positive.
    pub fn initialize<R: Rng + ?Sized>(count: usize, area: IVec2, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle::at(rng.random_range(0..area.x), rng.random_range(0..area.y)))
            .collect();

        Self { particles, area }
    }

    /// Wrap an existing population; used by tests and tools that need exact layouts.
    pub fn from_particles(particles: Vec<Particle>, area: IVec2) -> Self {
        Self { particles, area }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn area(&self) -> IVec2 {
        self.area
    }

    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}

impl Index<usize> for ParticleStore {
    type Output = Particle;

    #[inline]
    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}

impl IndexMut<usize> for ParticleStore {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn initialize_scatters_inside_area_at_rest() {
        let mut rng = StdRng::seed_from_u64(7);
        let area = IVec2::new(64, 48);
        let store = ParticleStore::initialize(10_000, area, &mut rng);

        assert_eq!(store.len(), 10_000);
        for p in store.iter() {
            assert!((0..area.x).contains(&p.x));
            assert!((0..area.y).contains(&p.y));
            assert_eq!(p.xv, 0.0);
            assert_eq!(p.yv, 0.0);
        }
    }

    #[test]
    fn same_seed_gives_same_scatter() {
        let area = IVec2::new(320, 200);
        let a = ParticleStore::initialize(500, area, &mut StdRng::seed_from_u64(42));
        let b = ParticleStore::initialize(500, area, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn index_access_reads_and_writes() {
        let mut store = ParticleStore::from_particles(vec![Particle::at(1, 2); 3], IVec2::new(10, 10));
        store[1].x = 9;
        assert_eq!(store[1].position(), IVec2::new(9, 2));
        assert_eq!(store[0].position(), IVec2::new(1, 2));
    }
}
