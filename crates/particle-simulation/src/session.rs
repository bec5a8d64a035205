//! Swarm session
//!
//! Owns everything one running swarm needs: the particle arena, the worker
//! pool, the framebuffer and the pass counter. A frame is a periodic sort, one
//! physics fan-out and one render fan-out, each joined before the next starts.
//! Both fan-outs hand each worker task one [`Partition`] range as a chunk.

use std::time::Instant;

use glam::IVec2;
use log::{debug, info};
use particle_physics::{step, Particle, ParticleStore};
use particle_renderer::{FrameBuffer, FrameView};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::SwarmConfig;
use crate::error::{ConfigError, SessionError};
use crate::partition::Partition;
use crate::sorter::PeriodicSorter;

pub struct Session {
    config: SwarmConfig,
    store: ParticleStore,
    partition: Partition,
    sorter: PeriodicSorter,
    framebuffer: FrameBuffer,
    pool: rayon::ThreadPool,
    workers: usize,
    pass: u64,
}

impl Session {
    /// Scatter `config.particle_count` particles over a `width × height` area.
    pub fn new(config: SwarmConfig, width: u32, height: u32) -> Result<Self, SessionError> {
        config.validate()?;
        let area = checked_area(width, height)?;

        let store = match config.seed {
            Some(seed) => {
                ParticleStore::initialize(config.particle_count, area, &mut StdRng::seed_from_u64(seed))
            }
            None => ParticleStore::initialize(config.particle_count, area, &mut rand::rng()),
        };

        Self::build(config, store)
    }

    /// Start from an explicit population. `config.particle_count` is ignored.
    pub fn with_particles(
        config: SwarmConfig,
        width: u32,
        height: u32,
        particles: Vec<Particle>,
    ) -> Result<Self, SessionError> {
        let config = config.with_particle_count(particles.len());
        config.validate()?;
        let area = checked_area(width, height)?;

        if particles
            .iter()
            .any(|p| p.x < 0 || p.y < 0 || p.x >= area.x || p.y >= area.y)
        {
            return Err(ConfigError::InvalidArea { width, height }.into());
        }

        Self::build(config, ParticleStore::from_particles(particles, area))
    }

    fn build(config: SwarmConfig, store: ParticleStore) -> Result<Self, SessionError> {
        let workers = config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("swarm-worker-{}", i))
            .build()?;

        let partition = Partition::with_heuristic(
            store.len(),
            workers,
            config.chunks_per_worker,
            config.min_chunk_size,
        );

        let area = store.area();
        let framebuffer = FrameBuffer::new(area.x as u32, area.y as u32)
            .with_blue_channel(config.blue_channel)
            .with_pixel_writes(config.pixel_writes);

        info!(
            "Swarm session: {} particles over {}x{}, {} workers, {} ranges of up to {}",
            store.len(),
            area.x,
            area.y,
            workers,
            partition.len(),
            partition.chunk_size()
        );

        Ok(Self {
            sorter: PeriodicSorter::new(config.sort_interval),
            config,
            store,
            partition,
            framebuffer,
            pool,
            workers,
            pass: 0,
        })
    }

    /// Run one full frame toward `target`.
    pub fn advance(&mut self, target: IVec2) {
        self.next_pass();
        self.animate(target);
        self.render();
    }

    /// Count a pass, sorting first when the sorter is due.
    fn next_pass(&mut self) {
        if self.sorter.is_due(self.pass) {
            let start = Instant::now();
            self.sorter.sort(self.store.as_mut_slice());
            debug!("Sorted {} particles in {:?}", self.store.len(), start.elapsed());
        }
        self.pass += 1;
    }

    /// Physics fan-out: every particle takes one step toward `target`.
    pub fn animate(&mut self, target: IVec2) {
        let area = self.store.area();
        let physics = self.config.physics;
        let chunk_size = self.partition.chunk_size();
        let particles = self.store.as_mut_slice();

        self.pool.install(|| {
            particles.par_chunks_mut(chunk_size).for_each(|chunk| {
                for particle in chunk {
                    step(particle, target, area, &physics);
                }
            });
        });
    }

    /// Render fan-out: clear to the background and blend every particle in.
    pub fn render(&mut self) {
        let particles = self.store.as_slice();
        let chunk_size = self.partition.chunk_size();
        let color = self.config.particle_color;

        let frame = self.framebuffer.lock();
        frame.fill(self.config.background_color);

        self.pool.install(|| {
            particles.par_chunks(chunk_size).for_each(|chunk| {
                for particle in chunk {
                    frame.blend_pixel(particle.x, particle.y, color);
                }
            });
        });

        frame.unlock();
    }

    /// Draw the initial scatter before the first idle frame.
    ///
    /// Counts as a pass, so it takes the first sort, but runs no physics.
    pub fn prime(&mut self) {
        self.next_pass();
        self.render();
    }

    /// The last rendered frame
    pub fn frame(&self) -> FrameView<'_> {
        self.framebuffer.view()
    }

    /// Passes run so far
    #[inline]
    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    #[inline]
    pub fn area(&self) -> IVec2 {
        self.store.area()
    }

    #[inline]
    pub fn partition(&self) -> Partition {
        self.partition
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }
}

fn checked_area(width: u32, height: u32) -> Result<IVec2, ConfigError> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(IVec2::new(w, h)),
        _ => Err(ConfigError::InvalidArea { width, height }),
    }
}
