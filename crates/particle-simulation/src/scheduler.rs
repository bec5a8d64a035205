//! Idle-driven frame scheduling
//!
//! The scheduler has no clock of its own. The host says when it is idle and
//! the scheduler runs frames back to back until the host has work again.

use std::time::{Duration, Instant};

use glam::IVec2;
use log::debug;
use particle_renderer::Presenter;

use crate::session::Session;

/// Host-side "is anything waiting?" query
pub trait IdleSignal {
    fn has_pending_events(&mut self) -> bool;
}

/// Current pointer position in client coordinates
pub trait PointerSource {
    fn pointer_position(&self) -> IVec2;
}

impl PointerSource for IVec2 {
    fn pointer_position(&self) -> IVec2 {
        *self
    }
}

/// Idle signal that reports pending work after a fixed number of frames.
///
/// Event loops that only learn about new events after control returns to them
/// use this to bound how long one idle slice may run.
#[derive(Clone, Copy, Debug)]
pub struct FrameBudget {
    remaining: usize,
}

impl FrameBudget {
    pub fn new(frames: usize) -> Self {
        Self { remaining: frames }
    }

    pub fn reset(&mut self, frames: usize) {
        self.remaining = frames;
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl IdleSignal for FrameBudget {
    fn has_pending_events(&mut self) -> bool {
        if self.remaining == 0 {
            return true;
        }
        self.remaining -= 1;
        false
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames simulated and rendered
    pub frames: u64,
    /// Frames whose presentation failed
    pub dropped: u64,
    pub last_frame: Duration,
}

#[derive(Debug, Default)]
pub struct RenderScheduler {
    stats: FrameStats,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run frames until `idle` reports pending events. Returns the number of frames run.
    pub fn run_while_idle<I, P, R>(
        &mut self,
        session: &mut Session,
        idle: &mut I,
        pointer: &P,
        presenter: &mut R,
    ) -> usize
    where
        I: IdleSignal + ?Sized,
        P: PointerSource + ?Sized,
        R: Presenter + ?Sized,
    {
        let mut frames = 0;
        while !idle.has_pending_events() {
            let start = Instant::now();

            session.advance(pointer.pointer_position());
            if let Err(e) = presenter.present(session.frame()) {
                debug!("Dropped frame {}: {}", session.pass(), e);
                self.stats.dropped += 1;
            }

            self.stats.frames += 1;
            self.stats.last_frame = start.elapsed();
            frames += 1;
        }
        frames
    }

    /// Present the last frame again. Failures are ignored.
    pub fn repaint<R: Presenter + ?Sized>(&self, session: &Session, presenter: &mut R) {
        if let Err(e) = presenter.present(session.frame()) {
            debug!("Repaint failed: {}", e);
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_allows_exactly_n_frames() {
        let mut budget = FrameBudget::new(3);
        let idle: Vec<_> = (0..5).map(|_| budget.has_pending_events()).collect();
        assert_eq!(idle, vec![false, false, false, true, true]);

        budget.reset(1);
        assert!(!budget.has_pending_events());
        assert!(budget.has_pending_events());
    }

    #[test]
    fn pointer_source_for_plain_position() {
        let p = IVec2::new(12, 34);
        assert_eq!(p.pointer_position(), IVec2::new(12, 34));
    }
}
