use anyhow::Result;

use crate::time::{FrameClock, FrameTime};

/// Host primitive that arranges for the next frame to run.
///
/// Implemented over whatever cadence the host has: a redraw request, an
/// animation-frame callback, a vsync'd swap.
pub trait FrameScheduler {
    /// Requests one more frame. Ignored after `cancel`.
    fn schedule(&mut self);

    /// Withdraws any pending request and refuses new ones.
    fn cancel(&mut self);

    fn is_cancelled(&self) -> bool;
}

/// Flag-based scheduler for hosts that pump frames themselves.
///
/// The host polls `take_pending` and runs a frame when it returns `true`.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    cancelled: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a frame was requested, clearing the request.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) {
        if !self.cancelled {
            self.pending = true;
        }
    }

    fn cancel(&mut self) {
        self.cancelled = true;
        self.pending = false;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Not started yet.
    Idle,
    Running,
    /// Stopped for good, either on request or after a failed frame.
    Halted,
}

/// Result of a successful `FrameLoop::step`.
#[derive(Debug, Copy, Clone)]
pub enum Step {
    Rendered(FrameTime),
    /// The loop is not running; the render step was not called.
    Skipped,
}

/// Fail-stop frame loop.
///
/// Each step schedules its successor before rendering. If the render step
/// fails, the scheduler is cancelled and the loop halts; GPU state left by
/// the failed frame is not rolled back.
#[derive(Debug)]
pub struct FrameLoop {
    clock: FrameClock,
    state: LoopState,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::with_clock(FrameClock::new())
    }

    pub fn with_clock(clock: FrameClock) -> Self {
        Self {
            clock,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Starts the loop and schedules the first frame. A halted loop stays halted.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.state != LoopState::Idle {
            return;
        }
        self.state = LoopState::Running;
        self.clock.reset();
        scheduler.schedule();
    }

    /// Halts the loop without an error.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        scheduler.cancel();
        self.state = LoopState::Halted;
    }

    /// Runs one frame. A scheduler cancelled from outside halts the loop.
    pub fn step<S, F>(&mut self, scheduler: &mut S, render: F) -> Result<Step>
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(FrameTime) -> Result<()>,
    {
        if self.state == LoopState::Running && scheduler.is_cancelled() {
            log::debug!("frame scheduler cancelled, halting frame loop");
            self.state = LoopState::Halted;
        }
        if self.state != LoopState::Running {
            return Ok(Step::Skipped);
        }

        scheduler.schedule();
        let time = self.clock.tick();

        match render(time) {
            Ok(()) => Ok(Step::Rendered(time)),
            Err(err) => {
                self.stop(scheduler);
                log::error!("frame {} failed, halting frame loop: {err:#}", time.frame_index);
                Err(err.context(format!("frame {} failed", time.frame_index)))
            }
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
