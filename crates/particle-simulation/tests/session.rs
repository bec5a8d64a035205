use glam::IVec2;
use particle_physics::{Particle, PhysicsParams};
use particle_renderer::{FrameView, PixelWrites, PresentError, Presenter};
use particle_simulation::*;

#[derive(Default)]
struct RecordingPresenter {
    frames: Vec<Vec<u32>>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: FrameView<'_>) -> Result<(), PresentError> {
        self.frames.push(frame.pixels.to_vec());
        Ok(())
    }
}

struct FailingPresenter;

impl Presenter for FailingPresenter {
    fn present(&mut self, frame: FrameView<'_>) -> Result<(), PresentError> {
        Err(PresentError::FrameSizeMismatch {
            expected: (1, 1),
            actual: (frame.width, frame.height),
        })
    }
}

fn config(count: usize) -> SwarmConfig {
    SwarmConfig::default()
        .with_particle_count(count)
        .with_workers(4)
        .with_seed(42)
}

/// Physics that leaves particles where they are
fn frozen() -> PhysicsParams {
    PhysicsParams {
        attraction: 0.0,
        ..PhysicsParams::default()
    }
}

#[test]
fn idle_slice_runs_one_frame_per_budget_step() {
    let mut session = Session::new(config(2_000), 80, 60).unwrap();
    let mut scheduler = RenderScheduler::new();
    let mut presenter = RecordingPresenter::default();
    let mut budget = FrameBudget::new(10);

    let ran = scheduler.run_while_idle(&mut session, &mut budget, &IVec2::new(40, 30), &mut presenter);

    assert_eq!(ran, 10);
    assert_eq!(session.pass(), 10);
    assert_eq!(presenter.frames.len(), 10);
    assert!(presenter.frames.iter().all(|f| f.len() == 80 * 60));
    assert_eq!(scheduler.stats().frames, 10);
    assert_eq!(scheduler.stats().dropped, 0);
}

#[test]
fn failed_presentation_does_not_stop_the_loop() {
    let mut session = Session::new(config(500), 32, 32).unwrap();
    let mut scheduler = RenderScheduler::new();
    let mut budget = FrameBudget::new(5);

    let ran = scheduler.run_while_idle(&mut session, &mut budget, &IVec2::ZERO, &mut FailingPresenter);

    assert_eq!(ran, 5);
    assert_eq!(session.pass(), 5);
    assert_eq!(scheduler.stats().dropped, 5);

    // Repaint swallows the error too
    scheduler.repaint(&session, &mut FailingPresenter);
}

#[test]
fn particles_stay_inside_the_area() {
    let mut session = Session::new(config(3_000), 50, 40).unwrap();
    let targets = [
        IVec2::new(25, 20),
        IVec2::new(-500, -500),
        IVec2::new(2_000, 10),
        IVec2::new(0, 39),
    ];

    for (i, target) in targets.iter().cycle().take(400).enumerate() {
        session.advance(*target);
        for p in session.particles() {
            assert!(
                p.x >= 0 && p.x < 50 && p.y >= 0 && p.y < 40,
                "particle escaped at pass {}: {:?}",
                i,
                p
            );
        }
    }
}

#[test]
fn first_pass_sorts_the_population() {
    let particles = vec![
        Particle::at(7, 3),
        Particle::at(1, 0),
        Particle::at(2, 3),
        Particle::at(5, 1),
        Particle::at(0, 0),
    ];
    let mut session =
        Session::with_particles(config(0).with_physics(frozen()), 10, 10, particles).unwrap();
    assert!(!is_screen_ordered(session.particles()));

    session.advance(IVec2::new(5, 5));

    assert!(is_screen_ordered(session.particles()));
    let positions: Vec<_> = session.particles().iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(positions, vec![(0, 0), (1, 0), (5, 1), (2, 3), (7, 3)]);
}

#[test]
fn prime_sorts_and_draws_without_physics() {
    let mut session = Session::new(config(200), 20, 20).unwrap();
    let mut before = session.particles().to_vec();
    PeriodicSorter::default().sort(&mut before);

    session.prime();

    // Takes pass 0 and its sort, but nothing moves
    assert_eq!(session.pass(), 1);
    assert_eq!(session.particles(), &before[..]);
    let frame = session.frame();
    assert!(frame.pixels.iter().any(|&p| p != 0xff00_0000));
    assert!(frame.pixels.iter().all(|&p| p >> 24 == 0xff));
}

#[test]
fn repaint_presents_the_last_frame() {
    let mut session = Session::new(config(300), 16, 16).unwrap();
    let mut scheduler = RenderScheduler::new();
    let mut presenter = RecordingPresenter::default();

    session.prime();
    scheduler.repaint(&session, &mut presenter);
    scheduler.run_while_idle(&mut session, &mut FrameBudget::new(2), &IVec2::new(8, 8), &mut presenter);
    scheduler.repaint(&session, &mut presenter);

    assert_eq!(presenter.frames.len(), 4);
    assert_eq!(presenter.frames[2], presenter.frames[3]);
    assert_eq!(session.pass(), 3);
}

#[test]
fn atomic_writes_match_a_sequential_render() {
    // Every particle on one pixel and every blend applies the same colour, so
    // only a lost update can change the result
    let particles = vec![Particle::at(0, 0); 50];
    let mut base = config(0)
        .with_physics(frozen())
        .with_colors(0xff81_8181, 0xff00_0000)
        .with_pixel_writes(PixelWrites::Atomic);
    base.min_chunk_size = 1;

    let mut parallel = Session::with_particles(base.clone(), 2, 2, particles.clone()).unwrap();
    assert!(parallel.partition().len() > 1);
    let mut sequential =
        Session::with_particles(base.with_workers(1), 2, 2, particles).unwrap();
    parallel.prime();
    sequential.prime();

    assert_eq!(parallel.frame().pixels, sequential.frame().pixels);
}
