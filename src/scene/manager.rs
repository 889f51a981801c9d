use crate::config::model::{LineDefinition, RevealConfig};
use crate::foundation::color::StrokeColor;
use crate::foundation::core::Size;
use crate::foundation::error::RevealResult;
use crate::host::Host;
use crate::render::surface::{PolylineDraw, Surface};
use crate::scene::line::LineState;
use crate::scene::projection::OrthoProjection;

/// Styling of one visual line object, bound to the [`LineState`] at the same index.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LineStyle {
    color: StrokeColor,
    opacity: f64,
}

/// Owns the overlay surface, the projection and the per-stroke reveal state of one mounted effect.
#[derive(Debug)]
pub struct SceneManager {
    projection: OrthoProjection,
    surface: Option<Surface>,
    lines: Vec<LineState>,
    styles: Vec<LineStyle>,
    stroke_width: f64,
}

impl SceneManager {
    /// Build the scene for a container of `size` and attach its surface to the host.
    ///
    /// Callers guarantee a single call per mount; nothing here guards against a second one.
    #[tracing::instrument(skip(lines, config, host), fields(lines = lines.len()))]
    pub fn initialize<H: Host + ?Sized>(
        size: Size,
        lines: &[LineDefinition],
        config: &RevealConfig,
        host: &mut H,
    ) -> RevealResult<Self> {
        let projection = OrthoProjection::for_container(size, config.depth);
        let states = lines
            .iter()
            .map(|def| LineState::from_definition(def, size, config.curve_segments))
            .collect::<RevealResult<Vec<_>>>()?;
        let styles = lines
            .iter()
            .map(|def| LineStyle {
                color: def.color,
                opacity: def.opacity,
            })
            .collect();

        let ratio = effective_pixel_ratio(host.device_pixel_ratio(), config.max_pixel_ratio);
        let surface = Surface::new(size, ratio)?;
        host.attach_surface(surface.node())?;
        tracing::debug!(
            surface = surface.id().0,
            pixel_ratio = ratio,
            "scene initialized"
        );

        Ok(Self {
            projection,
            surface: Some(surface),
            lines: states,
            styles,
            stroke_width: config.stroke_width,
        })
    }

    /// Redraw every stroke's revealed prefix and present the frame. No-op once disposed.
    pub fn repaint<H: Host + ?Sized>(&mut self, host: &mut H) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (pw, ph) = surface.pixel_size();
        let transform = self.projection.surface_transform(pw, ph);
        let width = self.stroke_width;
        surface.draw(
            transform,
            self.lines
                .iter()
                .zip(&self.styles)
                .map(|(line, style)| PolylineDraw {
                    points: line.revealed(),
                    color: style.color,
                    opacity: style.opacity,
                    width,
                }),
        );
        host.present(surface.id(), surface.view());
    }

    /// Reallocate the surface and re-span the projection; reveal progress is untouched.
    ///
    /// If the surface cannot be reallocated (e.g. the container collapsed to zero) the error is
    /// returned and both surface and projection keep the last size that could be drawn.
    pub fn update_projection<H: Host + ?Sized>(
        &mut self,
        size: Size,
        host: &mut H,
    ) -> RevealResult<()> {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size)?;
            host.resize_surface(surface.node());
        }
        self.projection.resize(size);
        Ok(())
    }

    /// Release the surface and detach its node. Safe to call repeatedly.
    pub fn dispose<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(surface) = self.surface.take() {
            host.detach_surface(surface.id());
            tracing::debug!(surface = surface.id().0, "scene disposed");
        }
    }

    /// `true` after [`SceneManager::dispose`].
    pub fn is_disposed(&self) -> bool {
        self.surface.is_none()
    }

    /// Reveal state per stroke, in definition order.
    pub fn lines(&self) -> &[LineState] {
        &self.lines
    }

    pub(crate) fn lines_mut(&mut self) -> &mut [LineState] {
        &mut self.lines
    }

    /// Current projection.
    pub fn projection(&self) -> &OrthoProjection {
        &self.projection
    }

    /// The overlay surface, while not disposed.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }
}

/// Host pixel ratio capped at `max`; non-positive or non-finite host values count as 1.
pub fn effective_pixel_ratio(device: f64, max: f64) -> f64 {
    let device = if device.is_finite() && device > 0.0 {
        device
    } else {
        1.0
    };
    device.min(max)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/manager.rs"]
mod tests;
