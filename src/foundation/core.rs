use crate::foundation::error::{RevealError, RevealResult};

pub use kurbo::{Affine, Point, Vec2};

/// Measured size of the host container in CSS (logical) pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl Size {
    /// Construct a size; both extents must be finite and non-negative.
    pub fn new(width: f64, height: f64) -> RevealResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(RevealError::validation("Size extents must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(RevealError::validation("Size extents must be >= 0"));
        }
        Ok(Self { width, height })
    }

    /// Physical pixel extent for a given device pixel ratio (floored, like a canvas backing store).
    pub fn to_physical(self, pixel_ratio: f64) -> (u32, u32) {
        fn px(v: f64, ratio: f64) -> u32 {
            (v * ratio).floor().clamp(0.0, f64::from(u32::MAX)) as u32
        }
        (px(self.width, pixel_ratio), px(self.height, pixel_ratio))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Undo premultiplication (lossy for small alpha).
    pub fn to_straight_rgba(self) -> [u8; 4] {
        fn unpremul(c: u8, a: u8) -> u8 {
            if a == 0 {
                return 0;
            }
            let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
            v.min(255) as u8
        }

        [
            unpremul(self.r, self.a),
            unpremul(self.g, self.a),
            unpremul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
