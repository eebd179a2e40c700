use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::{Window, WindowId};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
pub trait App {
    /// Called once the window exists.
    ///
    /// The host creates its GL surface and context here, typically building a
    /// `ResourceFactory` and the resources it draws with. An error aborts the
    /// runtime before any frame runs.
    fn on_resumed(&mut self, window: &Window) -> Result<()>;

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per frame.
    ///
    /// Returning an error halts the frame loop: no further frames are
    /// scheduled and `Runtime::run` returns that error.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl>;
}
