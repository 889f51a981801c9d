//! Host page boundary.
//!
//! The engine never touches a real DOM. Everything it needs from the embedding page goes through
//! [`Host`]; everything the page reports back (intersection changes, frame ticks, resizes,
//! unmount) is forwarded to [`crate::LineReveal`] by the embedder.

use crate::foundation::core::Size;
use crate::foundation::error::RevealResult;

/// In-memory recording host for tests and offline previews.
pub mod headless;

/// Identifies one pending animation-frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Identifies a registered visibility observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Identifies a registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Identifies a surface node attached to the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Description of the overlay node appended to the container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceNode {
    /// Node identity, unique per process.
    pub id: SurfaceId,
    /// Backing store width in physical pixels.
    pub pixel_width: u32,
    /// Backing store height in physical pixels.
    pub pixel_height: u32,
    /// Displayed size in container pixels.
    pub css_size: Size,
    /// Paint order relative to the container's content; always negative (behind content).
    pub z_index: i32,
    /// The node never receives pointer events.
    pub interactive: bool,
}

/// Borrowed view of a rendered surface, premultiplied RGBA8, tightly packed, row-major.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// Pixel bytes.
    pub data: &'a [u8],
}

/// Services the embedding page provides to one mounted effect.
///
/// All calls happen on the embedder's thread. Implementations must tolerate cancel/disconnect/
/// remove/detach calls for ids that are no longer live.
pub trait Host {
    /// Current container size, or `None` when there is no container to measure.
    fn container_size(&self) -> Option<Size>;

    /// Device pixel ratio of the display showing the container.
    fn device_pixel_ratio(&self) -> f64;

    /// Append the overlay node to the container.
    fn attach_surface(&mut self, node: SurfaceNode) -> RevealResult<()>;

    /// Update an attached node after a resize.
    fn resize_surface(&mut self, node: SurfaceNode);

    /// Remove the overlay node from the container.
    fn detach_surface(&mut self, id: SurfaceId);

    /// Show freshly rendered pixels on an attached node.
    fn present(&mut self, id: SurfaceId, frame: FrameView<'_>);

    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a frame request; a no-op if it already ran.
    fn cancel_frame(&mut self, token: FrameToken);

    /// Start reporting the container's visible fraction.
    fn observe_visibility(&mut self, threshold: f64) -> ObserverId;

    /// Stop reporting visibility.
    fn disconnect_visibility(&mut self, id: ObserverId);

    /// Start reporting container/window resizes.
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Stop reporting resizes.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// A host-delivered animation frame callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Token returned by the matching [`Host::request_frame`].
    pub token: FrameToken,
    /// Host timestamp in milliseconds, when the host supplies one.
    pub timestamp_ms: Option<f64>,
}

impl FrameTick {
    /// Tick without a timestamp.
    pub fn new(token: FrameToken) -> Self {
        Self {
            token,
            timestamp_ms: None,
        }
    }

    /// Tick with a timestamp in milliseconds.
    pub fn at(token: FrameToken, timestamp_ms: f64) -> Self {
        Self {
            token,
            timestamp_ms: Some(timestamp_ms),
        }
    }
}
