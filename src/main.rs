//! Particle Swarm
//!
//! A million particles chase the mouse cursor. Physics and rendering run on the
//! CPU worker pool; the finished frame is blitted to the window with wgpu.

mod settings;

use glam::IVec2;
use particle_renderer::FramePresenter;
use particle_simulation::{FrameBudget, RenderScheduler, Session, SwarmConfig};
use std::collections::VecDeque;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Frames run per idle wake-up before control returns to the event loop
const FRAMES_PER_WAKE: usize = 1;

/// Frame times kept for the FPS average
const FRAME_WINDOW: usize = 100;

struct SwarmState {
    session: Session,
    presenter: FramePresenter,
    scheduler: RenderScheduler,
    budget: FrameBudget,
    frame_times: VecDeque<f32>,
}

impl SwarmState {
    fn new(config: SwarmConfig, window: Arc<Window>) -> Result<Self, Box<dyn std::error::Error>> {
        // The simulation area is fixed to the window size at first show
        let size = window.inner_size();
        let session = Session::new(config, size.width, size.height)?;
        let presenter = pollster::block_on(FramePresenter::new(
            window,
            size.width,
            size.height,
            size.width,
            size.height,
        ))?;

        let scheduler = RenderScheduler::new();
        let mut state = Self {
            session,
            presenter,
            scheduler,
            budget: FrameBudget::new(FRAMES_PER_WAKE),
            frame_times: VecDeque::with_capacity(FRAME_WINDOW),
        };

        // Show the initial scatter before the first idle frame
        state.session.prime();
        state.scheduler.repaint(&state.session, &mut state.presenter);

        Ok(state)
    }

    /// Run frames for one idle wake-up. Returns the average frame time in ms.
    fn run_idle(&mut self, cursor: IVec2) -> Option<f32> {
        self.budget.reset(FRAMES_PER_WAKE);
        let ran = self.scheduler.run_while_idle(
            &mut self.session,
            &mut self.budget,
            &cursor,
            &mut self.presenter,
        );
        if ran == 0 {
            return None;
        }

        let frame_time = self.scheduler.stats().last_frame.as_secs_f32() * 1000.0;
        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_WINDOW {
            self.frame_times.pop_front();
        }

        Some(self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32)
    }
}

struct App {
    config: SwarmConfig,
    window: Option<Arc<Window>>,
    state: Option<SwarmState>,
    cursor: IVec2,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Particle Swarm")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match SwarmState::new(self.config.clone(), window.clone()) {
            Ok(state) => {
                self.window = Some(window);
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to start swarm: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.presenter.resize(size.width, size.height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = IVec2::new(position.x as i32, position.y as i32);
            }

            WindowEvent::RedrawRequested => {
                if let Some(state) = &mut self.state {
                    state.scheduler.repaint(&state.session, &mut state.presenter);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let (Some(window), Some(state)) = (&self.window, &mut self.state) else {
            return;
        };

        if let Some(avg_frame_time) = state.run_idle(self.cursor) {
            let stats = state.scheduler.stats();
            window.set_title(&format!(
                "Particle Swarm - {:.0} FPS ({:.2}ms) - {} particles - {} dropped",
                1000.0 / avg_frame_time,
                avg_frame_time,
                state.session.particles().len(),
                stats.dropped
            ));
        }
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting particle swarm...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config: settings::from_env(),
        window: None,
        state: None,
        cursor: IVec2::ZERO,
    };

    event_loop.run_app(&mut app)
}
