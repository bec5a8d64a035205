//! Session configuration
//!
//! Everything the reference swarm hard-coded is a field here. Defaults reproduce
//! the reference behaviour.

use particle_physics::{PhysicsParams, BACKGROUND_COLOR, PARTICLE_COLOR, PARTICLE_COUNT};
use particle_renderer::{BlueChannel, PixelWrites};

use crate::error::ConfigError;

/// Passes between two reorderings of the particle array
pub const SORT_INTERVAL: u64 = 5000;

/// Ranges handed out per worker
pub const CHUNKS_PER_WORKER: usize = 2;

/// Smallest range worth dispatching as its own task
pub const MIN_CHUNK_SIZE: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct SwarmConfig {
    pub particle_count: usize,
    pub physics: PhysicsParams,

    /// Worker threads; `None` uses the host's available parallelism
    pub workers: Option<usize>,
    pub chunks_per_worker: usize,
    pub min_chunk_size: usize,

    pub sort_interval: u64,

    pub particle_color: u32,
    pub background_color: u32,
    pub blue_channel: BlueChannel,
    pub pixel_writes: PixelWrites,

    /// Seed for the initial scatter; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            physics: PhysicsParams::default(),
            workers: None,
            chunks_per_worker: CHUNKS_PER_WORKER,
            min_chunk_size: MIN_CHUNK_SIZE,
            sort_interval: SORT_INTERVAL,
            particle_color: PARTICLE_COLOR,
            background_color: BACKGROUND_COLOR,
            blue_channel: BlueChannel::Literal,
            pixel_writes: PixelWrites::Racy,
            seed: None,
        }
    }
}

impl SwarmConfig {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsParams) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_sort_interval(mut self, interval: u64) -> Self {
        self.sort_interval = interval;
        self
    }

    pub fn with_colors(mut self, particle: u32, background: u32) -> Self {
        self.particle_color = particle;
        self.background_color = background;
        self
    }

    pub fn with_blue_channel(mut self, blue: BlueChannel) -> Self {
        self.blue_channel = blue;
        self
    }

    pub fn with_pixel_writes(mut self, writes: PixelWrites) -> Self {
        self.pixel_writes = writes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolved worker count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }
        if self.chunks_per_worker == 0 || self.min_chunk_size == 0 {
            return Err(ConfigError::InvalidChunking);
        }
        if self.sort_interval == 0 {
            return Err(ConfigError::ZeroSortInterval);
        }

        let physics = &self.physics;
        let checks = [
            ("attraction", physics.attraction, physics.attraction.is_finite()),
            (
                "dead_zone_radius",
                physics.dead_zone_radius,
                physics.dead_zone_radius.is_finite() && physics.dead_zone_radius > 0.0,
            ),
            (
                "damping",
                physics.damping,
                physics.damping.is_finite() && physics.damping >= 0.0,
            ),
            (
                "restitution",
                physics.restitution,
                physics.restitution.is_finite() && physics.restitution >= 0.0,
            ),
        ];
        for (name, value, ok) in checks {
            if !ok {
                return Err(ConfigError::InvalidPhysics { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_swarm() {
        let config = SwarmConfig::default();
        assert_eq!(config.particle_count, 1_000_000);
        assert_eq!(config.sort_interval, 5000);
        assert_eq!(config.min_chunk_size, 100);
        assert_eq!(config.physics.dead_zone_sq(), 400.0);
        assert_eq!(config.physics.restitution, 0.5);
        assert!((config.physics.damping - 0.9975).abs() < 1e-8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unusable_values() {
        let base = SwarmConfig::default();
        assert_eq!(
            base.clone().with_particle_count(0).validate(),
            Err(ConfigError::NoParticles)
        );
        assert_eq!(base.clone().with_workers(0).validate(), Err(ConfigError::NoWorkers));
        assert_eq!(
            base.clone().with_sort_interval(0).validate(),
            Err(ConfigError::ZeroSortInterval)
        );

        let physics = PhysicsParams {
            dead_zone_radius: 0.0,
            ..PhysicsParams::default()
        };
        assert!(matches!(
            base.with_physics(physics).validate(),
            Err(ConfigError::InvalidPhysics { name: "dead_zone_radius", .. })
        ));
    }

    #[test]
    fn explicit_workers_win() {
        assert_eq!(SwarmConfig::default().with_workers(3).worker_count(), 3);
        assert!(SwarmConfig::default().worker_count() >= 1);
    }
}
