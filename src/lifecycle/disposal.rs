use crate::animation::scheduler::AnimationScheduler;
use crate::host::Host;
use crate::lifecycle::resize::ResizeHandler;
use crate::lifecycle::visibility::VisibilityTrigger;
use crate::scene::manager::SceneManager;

/// Everything a mounted effect may have acquired from the host.
pub struct Teardown<'a> {
    /// Visibility observer.
    pub visibility: &'a mut VisibilityTrigger,
    /// Frame loop and its pending request.
    pub scheduler: &'a mut AnimationScheduler,
    /// Resize listener.
    pub resize: &'a mut ResizeHandler,
    /// Scene, if initialization ran.
    pub scene: Option<&'a mut SceneManager>,
}

/// Releases a mounted effect's resources exactly once, from any lifecycle state.
#[derive(Debug, Default)]
pub struct DisposalManager {
    disposed: bool,
}

impl DisposalManager {
    /// Manager for a live mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release observer, frame request, resize listener and surface, in that order.
    ///
    /// Returns `false` when disposal already ran; the second call touches nothing.
    pub fn dispose<H: Host + ?Sized>(&mut self, parts: Teardown<'_>, host: &mut H) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;

        parts.visibility.disconnect(host);
        parts.scheduler.stop(host);
        parts.resize.remove(host);
        if let Some(scene) = parts.scene {
            scene.dispose(host);
        }
        tracing::debug!("reveal disposed");
        true
    }

    /// `true` once [`DisposalManager::dispose`] ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/disposal.rs"]
mod tests;
