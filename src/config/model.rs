use crate::curve::sampler::MAX_CURVE_SEGMENTS;
use crate::foundation::color::StrokeColor;
use crate::foundation::core::{Point, Size};
use crate::foundation::error::{RevealError, RevealResult};

/// Coordinate space of a [`LineDefinition`]'s control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// Container pixels, origin at the top-left corner.
    #[default]
    Px,
    /// Fractions of the container size measured at initialization (`0..1` spans the container).
    Relative,
}

/// One authored stroke. Immutable once built.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineDefinition {
    /// Ordered control points (at least 2).
    pub points: Vec<Point>,
    /// Points revealed per frame; fractional values are rounded up when applied.
    pub speed: f64,
    /// Animation time in seconds before the stroke starts revealing.
    #[serde(default)]
    pub delay: f64,
    /// Display opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Stroke color.
    pub color: StrokeColor,
    /// Coordinate space of `points`.
    #[serde(default)]
    pub units: Units,
}

fn default_opacity() -> f64 {
    1.0
}

impl LineDefinition {
    /// Start a definition in container pixels with opacity 1 and no delay.
    pub fn new(points: Vec<Point>, speed: f64, color: StrokeColor) -> Self {
        Self {
            points,
            speed,
            delay: 0.0,
            opacity: 1.0,
            color,
            units: Units::Px,
        }
    }

    /// Builder-style delay setter.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Builder-style opacity setter.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Builder-style units setter.
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Check the invariants the scheduler relies on.
    ///
    /// `speed` must be strictly positive, otherwise the stroke never completes and the frame loop
    /// never reaches its terminal state.
    pub fn validate(&self) -> RevealResult<()> {
        if self.points.len() < 2 {
            return Err(RevealError::validation(
                "line needs at least 2 control points",
            ));
        }
        if self.points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(RevealError::validation("line control points must be finite"));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(RevealError::validation("line speed must be finite and > 0"));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(RevealError::validation("line delay must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(RevealError::validation("line opacity must be in [0, 1]"));
        }
        if !self.color.is_finite() {
            return Err(RevealError::validation("line color must be finite"));
        }
        Ok(())
    }

    /// Control points mapped into container pixels.
    pub fn resolve_points(&self, container: Size) -> Vec<Point> {
        match self.units {
            Units::Px => self.points.clone(),
            Units::Relative => self
                .points
                .iter()
                .map(|p| Point::new(p.x * container.width, p.y * container.height))
                .collect(),
        }
    }

    /// Reveal step applied per frame (`ceil(speed)`).
    pub fn step_points(&self) -> usize {
        self.speed.ceil().max(1.0) as usize
    }
}

/// How the scheduler advances its animation clock each frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrameStep {
    /// Constant nominal increment per frame, independent of the real refresh rate.
    Fixed {
        /// Seconds added per frame.
        secs: f64,
    },
    /// Real time between host frame timestamps, clamped to `[0, max_delta_secs]`.
    ///
    /// The first frame has no predecessor and uses `nominal_secs`.
    Measured {
        /// Increment used when no previous timestamp is known.
        nominal_secs: f64,
        /// Upper bound for one frame's increment (e.g. after a backgrounded tab).
        max_delta_secs: f64,
    },
}

impl Default for FrameStep {
    fn default() -> Self {
        Self::Fixed {
            secs: DEFAULT_FRAME_STEP_SECS,
        }
    }
}

/// Nominal frame increment (~60 Hz).
pub const DEFAULT_FRAME_STEP_SECS: f64 = 0.016;

/// Near/far bounds of the orthographic projection.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DepthRange {
    /// Near plane.
    pub near: f64,
    /// Far plane.
    pub far: f64,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            near: -1000.0,
            far: 1000.0,
        }
    }
}

impl DepthRange {
    /// `true` if flat geometry at `z` falls inside the bounds.
    pub fn contains(&self, z: f64) -> bool {
        self.near <= z && z <= self.far
    }
}

/// Effect configuration.
///
/// Every field has a default, so `{}` is a valid JSON document and yields the built-in preset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction of the container that triggers initialization.
    pub visibility_threshold: f64,
    /// Cap applied to the host's device pixel ratio.
    pub max_pixel_ratio: f64,
    /// Segments per sampled curve; each stroke holds `curve_segments + 1` points.
    pub curve_segments: usize,
    /// Animation clock policy.
    pub frame_step: FrameStep,
    /// Stroke width in container pixels.
    pub stroke_width: f64,
    /// Projection depth bounds.
    pub depth: DepthRange,
    /// Strokes in paint order.
    pub lines: Vec<LineDefinition>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.1,
            max_pixel_ratio: 1.5,
            curve_segments: 80,
            frame_step: FrameStep::default(),
            stroke_width: 1.0,
            depth: DepthRange::default(),
            lines: default_lines(),
        }
    }
}

impl RevealConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> RevealResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> RevealResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every field and every line.
    pub fn validate(&self) -> RevealResult<()> {
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(RevealError::validation(
                "visibility_threshold must be in (0, 1]",
            ));
        }
        if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio <= 0.0 {
            return Err(RevealError::validation(
                "max_pixel_ratio must be finite and > 0",
            ));
        }
        if self.curve_segments == 0 || self.curve_segments > MAX_CURVE_SEGMENTS {
            return Err(RevealError::validation(format!(
                "curve_segments must be in 1..={MAX_CURVE_SEGMENTS}"
            )));
        }
        match self.frame_step {
            FrameStep::Fixed { secs } => {
                if !secs.is_finite() || secs <= 0.0 {
                    return Err(RevealError::validation("frame_step.secs must be > 0"));
                }
            }
            FrameStep::Measured {
                nominal_secs,
                max_delta_secs,
            } => {
                if !nominal_secs.is_finite() || nominal_secs <= 0.0 {
                    return Err(RevealError::validation(
                        "frame_step.nominal_secs must be > 0",
                    ));
                }
                if !max_delta_secs.is_finite() || max_delta_secs < nominal_secs {
                    return Err(RevealError::validation(
                        "frame_step.max_delta_secs must be >= nominal_secs",
                    ));
                }
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(RevealError::validation("stroke_width must be > 0"));
        }
        if !(self.depth.near.is_finite()
            && self.depth.far.is_finite()
            && self.depth.near < self.depth.far)
        {
            return Err(RevealError::validation("depth.near must be < depth.far"));
        }
        if !self.depth.contains(0.0) {
            return Err(RevealError::validation(
                "depth range must contain the stroke plane z = 0",
            ));
        }
        for (i, line) in self.lines.iter().enumerate() {
            line.validate()
                .map_err(|e| RevealError::validation(format!("lines[{i}]: {e}")))?;
        }
        Ok(())
    }
}

/// Built-in preset: five faint strokes sweeping across the container, staggered in time.
pub fn default_lines() -> Vec<LineDefinition> {
    fn rel(points: &[(f64, f64)]) -> Vec<Point> {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    let blue = StrokeColor::from_hex_u32(0x3b82f6);
    let violet = StrokeColor::from_hex_u32(0x8b5cf6);
    let teal = StrokeColor::from_hex_u32(0x14b8a6);

    vec![
        LineDefinition::new(
            rel(&[(0.0, 0.30), (0.25, 0.18), (0.55, 0.42), (0.80, 0.25), (1.0, 0.35)]),
            2.0,
            blue,
        )
        .with_opacity(0.15),
        LineDefinition::new(
            rel(&[(0.0, 0.65), (0.30, 0.80), (0.60, 0.55), (1.0, 0.72)]),
            1.5,
            violet,
        )
        .with_delay(0.3)
        .with_opacity(0.12),
        LineDefinition::new(
            rel(&[(0.10, 1.0), (0.35, 0.60), (0.50, 0.45), (0.70, 0.10), (0.90, 0.0)]),
            1.2,
            teal,
        )
        .with_delay(0.6)
        .with_opacity(0.10),
        LineDefinition::new(
            rel(&[(0.0, 0.10), (0.40, 0.05), (0.70, 0.22), (1.0, 0.08)]),
            2.5,
            violet,
        )
        .with_delay(0.9)
        .with_opacity(0.08),
        LineDefinition::new(
            rel(&[(0.05, 0.90), (0.45, 0.95), (0.75, 0.82), (1.0, 0.92)]),
            1.8,
            blue,
        )
        .with_delay(1.2)
        .with_opacity(0.10),
    ]
    .into_iter()
    .map(|l| l.with_units(Units::Relative))
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
