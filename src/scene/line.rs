use crate::config::model::LineDefinition;
use crate::curve::sampler::sample_curve;
use crate::foundation::core::{Point, Size};
use crate::foundation::error::RevealResult;

/// Runtime reveal state of one stroke.
///
/// `drawn` starts at 1, never decreases, and never exceeds `total_points().len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineState {
    total_points: Vec<Point>,
    drawn: usize,
    step: usize,
    delay: f64,
}

impl LineState {
    /// Sample `def` into a fresh state with only the first point revealed.
    pub fn from_definition(
        def: &LineDefinition,
        container: Size,
        segments: usize,
    ) -> RevealResult<Self> {
        def.validate()?;
        let total_points = sample_curve(&def.resolve_points(container), segments)?;
        Ok(Self {
            total_points,
            drawn: 1,
            step: def.step_points(),
            delay: def.delay,
        })
    }

    /// Every sampled point, revealed or not.
    pub fn total_points(&self) -> &[Point] {
        &self.total_points
    }

    /// Currently revealed prefix.
    pub fn revealed(&self) -> &[Point] {
        &self.total_points[..self.drawn]
    }

    /// Number of revealed points.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Points added per advancing frame.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Start delay in animation seconds.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// `true` while the animation clock has not reached this stroke's delay.
    pub fn is_waiting(&self, elapsed: f64) -> bool {
        elapsed < self.delay
    }

    /// `true` once every sampled point is revealed.
    pub fn is_complete(&self) -> bool {
        self.drawn >= self.total_points.len()
    }

    /// Reveal `step` more points, clamped to the total. Returns `true` if still incomplete.
    pub(crate) fn advance(&mut self) -> bool {
        self.drawn = self
            .drawn
            .saturating_add(self.step)
            .min(self.total_points.len());
        !self.is_complete()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/line.rs"]
mod tests;
