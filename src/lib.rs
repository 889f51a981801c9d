//! `stroke-reveal` draws a handful of faint curved strokes onto a transparent overlay behind a
//! content section, revealing them point by point once the section scrolls into view, then stops.
//!
//! # Lifecycle overview
//!
//! 1. **Mount**: [`LineReveal::mount`] registers a visibility observer and a resize listener with
//!    the [`Host`].
//! 2. **Trigger**: the first intersection report at or above the threshold initializes the
//!    [`SceneManager`] exactly once (curve sampling, projection, surface).
//! 3. **Animate**: the [`AnimationScheduler`] advances every [`LineState`] once per host frame and
//!    repaints; it halts for good when every stroke is fully drawn.
//! 4. **Resize**: the projection and surface follow the container size, progress untouched.
//! 5. **Dispose**: observer, pending frame, listener and surface are released, idempotently.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: every entry point runs on the embedder's thread; no locking.
//! - **Never fails outward**: [`LineReveal`] logs errors via `tracing` and degrades to no effect.
//! - **Premultiplied RGBA8** surfaces, rasterized on the CPU with `vello_cpu`.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod config;
mod curve;
mod foundation;
mod lifecycle;
mod scene;
mod session;

pub mod host;
pub mod render;

pub use animation::scheduler::{AnimationScheduler, SchedulerState, StepOutcome, StopHandle};
pub use config::model::{
    DEFAULT_FRAME_STEP_SECS, DepthRange, FrameStep, LineDefinition, RevealConfig, Units,
    default_lines,
};
pub use curve::sampler::{MAX_CURVE_SEGMENTS, sample_curve};
pub use foundation::color::StrokeColor;
pub use foundation::core::{Affine, Point, Rgba8Premul, Size, Vec2};
pub use foundation::error::{RevealError, RevealResult};
pub use host::headless::{HeadlessHost, HeadlessState, PresentedFrame};
pub use host::{
    FrameTick, FrameToken, FrameView, Host, ListenerId, ObserverId, SurfaceId, SurfaceNode,
};
pub use lifecycle::disposal::{DisposalManager, Teardown};
pub use lifecycle::resize::{ResizeHandler, ResizeOutcome};
pub use lifecycle::visibility::{OneShotGate, VisibilityTrigger};
pub use render::surface::{PolylineDraw, Surface};
pub use scene::line::LineState;
pub use scene::manager::{SceneManager, effective_pixel_ratio};
pub use scene::projection::OrthoProjection;
pub use session::line_reveal::LineReveal;
