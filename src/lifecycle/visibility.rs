use crate::host::{Host, ObserverId};

/// Single transition `false -> true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OneShotGate {
    fired: bool,
}

impl OneShotGate {
    /// Returns `true` exactly once: on the first call.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    /// `true` after the first [`OneShotGate::fire`].
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Fires initialization the first time the container's visible fraction reaches the threshold.
///
/// The observer stays registered after firing; only [`VisibilityTrigger::disconnect`] removes it.
#[derive(Debug)]
pub struct VisibilityTrigger {
    threshold: f64,
    gate: OneShotGate,
    observer: Option<ObserverId>,
}

impl VisibilityTrigger {
    /// Trigger for a visible fraction `>= threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            gate: OneShotGate::default(),
            observer: None,
        }
    }

    /// Register the observer with the host. No-op if already registered.
    pub fn observe<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.observer.is_none() {
            self.observer = Some(host.observe_visibility(self.threshold));
        }
    }

    /// Feed one intersection report. Returns `true` only for the report that should initialize.
    pub fn on_intersection(&mut self, visible_ratio: f64) -> bool {
        if self.observer.is_none() || !visible_ratio.is_finite() {
            return false;
        }
        visible_ratio >= self.threshold && self.gate.fire()
    }

    /// Unregister the observer. Safe to call repeatedly.
    pub fn disconnect<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.observer.take() {
            host.disconnect_visibility(id);
        }
    }

    /// `true` while the observer is registered.
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// `true` once initialization has been fired.
    pub fn has_fired(&self) -> bool {
        self.gate.has_fired()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/visibility.rs"]
mod tests;
