use crate::foundation::core::Size;
use crate::foundation::error::RevealResult;
use crate::host::{Host, ListenerId};
use crate::scene::manager::SceneManager;

/// What a resize notification did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeOutcome {
    /// Not initialized, already disposed, or the container could not be measured.
    Skipped,
    /// Projection and surface now span this size.
    Updated(Size),
}

/// Keeps the projection and surface in step with the container size.
#[derive(Debug, Default)]
pub struct ResizeHandler {
    listener: Option<ListenerId>,
}

impl ResizeHandler {
    /// Handler with no listener registered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resize listener with the host. No-op if already registered.
    pub fn listen<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.listener.is_none() {
            self.listener = Some(host.add_resize_listener());
        }
    }

    /// Re-measure the container and resize the scene. Never requests frames.
    pub fn handle<H: Host + ?Sized>(
        &self,
        scene: Option<&mut SceneManager>,
        host: &mut H,
    ) -> RevealResult<ResizeOutcome> {
        let Some(scene) = scene else {
            return Ok(ResizeOutcome::Skipped);
        };
        if scene.is_disposed() {
            return Ok(ResizeOutcome::Skipped);
        }
        let Some(size) = host.container_size() else {
            return Ok(ResizeOutcome::Skipped);
        };
        scene.update_projection(size, host)?;
        tracing::debug!(width = size.width, height = size.height, "scene resized");
        Ok(ResizeOutcome::Updated(size))
    }

    /// Unregister the listener. Safe to call repeatedly.
    pub fn remove<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.listener.take() {
            host.remove_resize_listener(id);
        }
    }

    /// `true` while the listener is registered.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/resize.rs"]
mod tests;
