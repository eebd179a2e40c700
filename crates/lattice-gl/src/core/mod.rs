//! Core engine-facing contracts.
//!
//! This module defines the interface between a frame driver and the render
//! code it calls: the application trait, the per-frame context, and the
//! fail-stop frame loop shared by every driver.

mod app;
mod ctx;
mod driver;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use driver::{FrameLoop, FrameScheduler, LoopState, ManualScheduler, Step};
