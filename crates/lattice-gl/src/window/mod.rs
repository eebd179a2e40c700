//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and drives a `core::FrameLoop` from
//! redraw requests.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
