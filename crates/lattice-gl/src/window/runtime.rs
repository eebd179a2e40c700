use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, FrameLoop, ManualScheduler, WindowCtx};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lattice".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
        }
    }
}

/// Single-window frame driver over winit.
///
/// Frames are requested continuously through redraw requests while the frame
/// loop runs. A failed frame halts the loop, closes the event loop, and is
/// returned from `run`.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState<A: App> {
    config: RuntimeConfig,
    app: A,

    window: Option<Window>,
    frames: FrameLoop,
    scheduler: ManualScheduler,

    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            frames: FrameLoop::new(),
            scheduler: ManualScheduler::new(),
            failure: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.frames.stop(&mut self.scheduler);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.failure = Some(err);
        self.request_exit(event_loop);
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.app
            .on_resumed(&window)
            .context("application setup failed")?;

        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let app = &mut self.app;
        let mut control = AppControl::Continue;

        let step = self.frames.step(&mut self.scheduler, |time| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window,
                },
                time,
            };
            control = app.on_frame(&mut ctx)?;
            Ok(())
        });

        match step {
            Err(err) => self.fail(event_loop, err),
            Ok(_) if control == AppControl::Exit => self.request_exit(event_loop),
            Ok(_) => {}
        }
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            log::error!("failed to start runtime: {err:#}");
            self.fail(event_loop, err);
            return;
        }

        self.frames.start(&mut self.scheduler);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        if self.scheduler.take_pending() {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.request_exit(event_loop);
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),
            _ => {}
        }
    }
}
