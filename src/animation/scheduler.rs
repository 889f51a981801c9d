use crate::config::model::FrameStep;
use crate::host::{FrameTick, FrameToken, Host};
use crate::scene::manager::SceneManager;
use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle of the reveal loop. `Done` and `Stopped` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not started.
    Idle,
    /// Frames are being requested.
    Running,
    /// Every stroke is fully drawn; no further frames.
    Done,
    /// Cancelled through a [`StopHandle`] or [`AnimationScheduler::stop`] before reaching `Done`.
    Stopped,
}

/// Result of delivering one frame tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tick was stale, stopped, or arrived outside `Running`; nothing changed.
    Ignored,
    /// Lines advanced, the scene was repainted and the next frame requested.
    Continued,
    /// Lines advanced, the scene was repainted and the loop reached `Done`.
    Finished,
}

/// Cancels the reveal loop. Clones share the same flag.
///
/// Once stopped, any frame request still pending with the host becomes a no-op when delivered.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    /// Stop the loop. Idempotent.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    /// `true` once [`StopHandle::stop`] ran.
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Cooperative per-frame reveal loop: one step per host display refresh.
pub struct AnimationScheduler {
    state: SchedulerState,
    step: FrameStep,
    frames: u64,
    elapsed: f64,
    last_timestamp_ms: Option<f64>,
    pending: Option<FrameToken>,
    handle: StopHandle,
}

impl AnimationScheduler {
    /// Idle scheduler using `step` as its clock policy.
    pub fn new(step: FrameStep) -> Self {
        Self {
            state: SchedulerState::Idle,
            step,
            frames: 0,
            elapsed: 0.0,
            last_timestamp_ms: None,
            pending: None,
            handle: StopHandle::default(),
        }
    }

    /// Leave `Idle` and request the first frame. Later calls only return the handle.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) -> StopHandle {
        if self.state == SchedulerState::Idle && !self.handle.is_stopped() {
            self.state = SchedulerState::Running;
            self.pending = Some(host.request_frame());
            tracing::debug!("reveal loop started");
        }
        self.handle.clone()
    }

    /// Run one frame step for `tick`.
    ///
    /// All lines are updated before the single repaint. A stale token, a stopped handle, or a
    /// state other than `Running` makes the tick a no-op.
    pub fn on_frame<H: Host + ?Sized>(
        &mut self,
        tick: FrameTick,
        scene: &mut SceneManager,
        host: &mut H,
    ) -> StepOutcome {
        if self.state != SchedulerState::Running
            || self.handle.is_stopped()
            || self.pending != Some(tick.token)
        {
            return StepOutcome::Ignored;
        }
        self.pending = None;
        self.advance_clock(tick.timestamp_ms);

        let elapsed = self.elapsed;
        let mut done = true;
        for line in scene.lines_mut() {
            if line.is_waiting(elapsed) {
                done = false;
                continue;
            }
            if line.advance() {
                done = false;
            }
        }

        scene.repaint(host);

        if done {
            self.state = SchedulerState::Done;
            self.handle.stop();
            tracing::debug!(frames = self.frames, elapsed, "reveal loop done");
            StepOutcome::Finished
        } else {
            self.pending = Some(host.request_frame());
            StepOutcome::Continued
        }
    }

    /// Stop the loop and withdraw any pending frame request.
    pub fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.handle.stop();
        if let Some(token) = self.pending.take() {
            host.cancel_frame(token);
        }
    }

    fn advance_clock(&mut self, timestamp_ms: Option<f64>) {
        self.frames += 1;
        match self.step {
            FrameStep::Fixed { secs } => {
                // `frames * secs`, not a running sum.
                self.elapsed = self.frames as f64 * secs;
            }
            FrameStep::Measured {
                nominal_secs,
                max_delta_secs,
            } => {
                let dt = match (self.last_timestamp_ms, timestamp_ms) {
                    (Some(prev), Some(now)) if now.is_finite() => {
                        ((now - prev) / 1000.0).clamp(0.0, max_delta_secs)
                    }
                    _ => nominal_secs,
                };
                self.elapsed += dt;
                if timestamp_ms.is_some_and(f64::is_finite) {
                    self.last_timestamp_ms = timestamp_ms;
                }
            }
        }
    }

    /// Current state. A stop from any clone of the handle reads as `Stopped` unless the loop
    /// already reached `Done`.
    pub fn state(&self) -> SchedulerState {
        match self.state {
            SchedulerState::Done => SchedulerState::Done,
            _ if self.handle.is_stopped() => SchedulerState::Stopped,
            s => s,
        }
    }

    /// Animation seconds accumulated so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frame steps executed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Token of the outstanding frame request, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// `true` once stopped, by its handle or by reaching `Done`.
    pub fn is_stopped(&self) -> bool {
        self.handle.is_stopped()
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("state", &self.state())
            .field("step", &self.step)
            .field("frames", &self.frames)
            .field("elapsed", &self.elapsed)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;
