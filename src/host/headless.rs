use crate::foundation::core::Size;
use crate::foundation::error::{RevealError, RevealResult};
use crate::host::{
    FrameToken, FrameView, Host, ListenerId, ObserverId, SurfaceId, SurfaceNode,
};
use std::cell::{Ref, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

/// Last frame presented on a surface, copied out of the engine.
#[derive(Clone, Debug)]
pub struct PresentedFrame {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl PresentedFrame {
    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

/// Everything a [`HeadlessHost`] has observed so far.
#[derive(Debug)]
pub struct HeadlessState {
    container: Option<Size>,
    pixel_ratio: f64,
    reject_surfaces: bool,
    retain_pixels: bool,

    next_id: u64,
    pending_frames: BTreeSet<FrameToken>,
    frame_requests: u64,
    observers: HashSet<ObserverId>,
    resize_listeners: HashSet<ListenerId>,
    attached: Vec<SurfaceNode>,
    presented: HashMap<SurfaceId, PresentedFrame>,
    present_count: u64,
}

impl HeadlessState {
    /// Frame requests not yet delivered or cancelled.
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Total number of [`Host::request_frame`] calls.
    pub fn frame_requests(&self) -> u64 {
        self.frame_requests
    }

    /// Live visibility observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Live resize listeners.
    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }

    /// Surface nodes currently attached to the container.
    pub fn attached(&self) -> &[SurfaceNode] {
        &self.attached
    }

    /// Total number of [`Host::present`] calls.
    pub fn present_count(&self) -> u64 {
        self.present_count
    }

    /// Most recent pixels presented on `id` (only kept when pixel retention is on).
    pub fn presented(&self, id: SurfaceId) -> Option<&PresentedFrame> {
        self.presented.get(&id)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Recording [`Host`] with no display attached.
///
/// Clones share state, so a test can keep one clone for inspection while the effect owns the
/// other (including after the effect is dropped). Frame requests queue up until the caller pops
/// them with [`HeadlessHost::next_frame`], which stands in for the display refresh.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessHost {
    /// Host with a measurable container of the given size and a pixel ratio of 1.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_container(Some(Size { width, height }))
    }

    /// Host whose container cannot be measured.
    pub fn without_container() -> Self {
        Self::with_container(None)
    }

    fn with_container(container: Option<Size>) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                container,
                pixel_ratio: 1.0,
                reject_surfaces: false,
                retain_pixels: true,
                next_id: 0,
                pending_frames: BTreeSet::new(),
                frame_requests: 0,
                observers: HashSet::new(),
                resize_listeners: HashSet::new(),
                attached: Vec::new(),
                presented: HashMap::new(),
                present_count: 0,
            })),
        }
    }

    /// Builder-style device pixel ratio.
    pub fn with_pixel_ratio(self, ratio: f64) -> Self {
        self.state.borrow_mut().pixel_ratio = ratio;
        self
    }

    /// Builder-style switch making [`Host::attach_surface`] fail, like a missing graphics context.
    pub fn rejecting_surfaces(self) -> Self {
        self.state.borrow_mut().reject_surfaces = true;
        self
    }

    /// Builder-style switch to skip copying presented pixels.
    pub fn without_pixel_retention(self) -> Self {
        self.state.borrow_mut().retain_pixels = false;
        self
    }

    /// Change the measured container size (a following resize event is up to the caller).
    pub fn set_container_size(&self, size: Option<Size>) {
        self.state.borrow_mut().container = size;
    }

    /// Deliver the oldest pending frame request, removing it from the queue.
    pub fn next_frame(&self) -> Option<FrameToken> {
        self.state.borrow_mut().pending_frames.pop_first()
    }

    /// Borrow the recorded state.
    pub fn state(&self) -> Ref<'_, HeadlessState> {
        self.state.borrow()
    }
}

impl Host for HeadlessHost {
    fn container_size(&self) -> Option<Size> {
        self.state.borrow().container
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.state.borrow().pixel_ratio
    }

    fn attach_surface(&mut self, node: SurfaceNode) -> RevealResult<()> {
        let mut st = self.state.borrow_mut();
        if st.reject_surfaces {
            return Err(RevealError::host("graphics context unavailable"));
        }
        st.attached.push(node);
        Ok(())
    }

    fn resize_surface(&mut self, node: SurfaceNode) {
        let mut st = self.state.borrow_mut();
        if let Some(slot) = st.attached.iter_mut().find(|n| n.id == node.id) {
            *slot = node;
        }
    }

    fn detach_surface(&mut self, id: SurfaceId) {
        let mut st = self.state.borrow_mut();
        st.attached.retain(|n| n.id != id);
        st.presented.remove(&id);
    }

    fn present(&mut self, id: SurfaceId, frame: FrameView<'_>) {
        let mut st = self.state.borrow_mut();
        st.present_count += 1;
        if st.retain_pixels {
            st.presented.insert(
                id,
                PresentedFrame {
                    width: frame.width,
                    height: frame.height,
                    data: frame.data.to_vec(),
                },
            );
        }
    }

    fn request_frame(&mut self) -> FrameToken {
        let mut st = self.state.borrow_mut();
        let token = FrameToken(st.next_id());
        st.frame_requests += 1;
        st.pending_frames.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.state.borrow_mut().pending_frames.remove(&token);
    }

    fn observe_visibility(&mut self, _threshold: f64) -> ObserverId {
        let mut st = self.state.borrow_mut();
        let id = ObserverId(st.next_id());
        st.observers.insert(id);
        id
    }

    fn disconnect_visibility(&mut self, id: ObserverId) {
        self.state.borrow_mut().observers.remove(&id);
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let mut st = self.state.borrow_mut();
        let id = ListenerId(st.next_id());
        st.resize_listeners.insert(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.state.borrow_mut().resize_listeners.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
