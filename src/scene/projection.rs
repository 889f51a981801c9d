use crate::config::model::DepthRange;
use crate::foundation::core::{Affine, Size, Vec2};

/// Orthographic projection spanning the container in its own pixel coordinates (y down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoProjection {
    /// Left edge (always 0).
    pub left: f64,
    /// Right edge (container width).
    pub right: f64,
    /// Top edge (always 0).
    pub top: f64,
    /// Bottom edge (container height).
    pub bottom: f64,
    /// Depth bounds; the strokes are flat and sit at depth 0.
    pub depth: DepthRange,
}

impl OrthoProjection {
    /// Projection covering exactly `size`.
    pub fn for_container(size: Size, depth: DepthRange) -> Self {
        Self {
            left: 0.0,
            right: size.width,
            top: 0.0,
            bottom: size.height,
            depth,
        }
    }

    /// Re-span the projection to a new container size, keeping the depth bounds.
    pub fn resize(&mut self, size: Size) {
        *self = Self::for_container(size, self.depth);
    }

    /// Container size the projection currently spans.
    pub fn size(&self) -> Size {
        Size {
            width: self.right - self.left,
            height: self.bottom - self.top,
        }
    }

    /// Transform from container coordinates to a `pixel_width x pixel_height` backing store.
    pub fn surface_transform(&self, pixel_width: u32, pixel_height: u32) -> Affine {
        let w = self.right - self.left;
        let h = self.bottom - self.top;
        if w <= 0.0 || h <= 0.0 {
            return Affine::scale(0.0);
        }
        let sx = f64::from(pixel_width) / w;
        let sy = f64::from(pixel_height) / h;
        Affine::scale_non_uniform(sx, sy) * Affine::translate(Vec2::new(-self.left, -self.top))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/projection.rs"]
mod tests;
