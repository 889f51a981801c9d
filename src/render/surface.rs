use crate::foundation::color::StrokeColor;
use crate::foundation::core::{Affine, Point, Rgba8Premul, Size};
use crate::foundation::error::{RevealError, RevealResult};
use crate::host::{FrameView, SurfaceId, SurfaceNode};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Paint order of the overlay relative to the container's content.
const BEHIND_CONTENT_Z: i32 = -1;

/// One polyline to stroke in container coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PolylineDraw<'a> {
    /// Vertices in order; fewer than 2 draws nothing.
    pub points: &'a [Point],
    /// Stroke color.
    pub color: StrokeColor,
    /// Opacity folded into the color's alpha.
    pub opacity: f64,
    /// Stroke width in container pixels.
    pub width: f64,
}

/// Transparent CPU raster target backing the overlay node.
///
/// Sized to `floor(css * pixel_ratio)` physical pixels. Rasterization uses `vello_cpu`.
pub struct Surface {
    id: SurfaceId,
    css_size: Size,
    pixel_ratio: f64,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id)
            .field("css_size", &self.css_size)
            .field("pixel_ratio", &self.pixel_ratio)
            .field("pixel_width", &self.pixmap.width())
            .field("pixel_height", &self.pixmap.height())
            .finish()
    }
}

impl Surface {
    /// Allocate a cleared surface. Fails on zero area or extents beyond the rasterizer's range.
    pub fn new(css_size: Size, pixel_ratio: f64) -> RevealResult<Self> {
        let (w, h) = physical_extent(css_size, pixel_ratio)?;
        Ok(Self {
            id: SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed)),
            css_size,
            pixel_ratio,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Reallocate the backing store for a new container size. Pixels are cleared.
    ///
    /// On failure the surface keeps its previous size.
    pub fn resize(&mut self, css_size: Size) -> RevealResult<()> {
        let (w, h) = physical_extent(css_size, self.pixel_ratio)?;
        if w != self.pixmap.width() || h != self.pixmap.height() {
            self.ctx = vello_cpu::RenderContext::new(w, h);
            self.pixmap = vello_cpu::Pixmap::new(w, h);
        } else {
            self.pixmap.data_as_u8_slice_mut().fill(0);
        }
        self.css_size = css_size;
        Ok(())
    }

    /// Node identity.
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Effective (capped) device pixel ratio.
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Displayed size in container pixels.
    pub fn css_size(&self) -> Size {
        self.css_size
    }

    /// Backing store extent in physical pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            u32::from(self.pixmap.width()),
            u32::from(self.pixmap.height()),
        )
    }

    /// Node description handed to the host.
    pub fn node(&self) -> SurfaceNode {
        let (pixel_width, pixel_height) = self.pixel_size();
        SurfaceNode {
            id: self.id,
            pixel_width,
            pixel_height,
            css_size: self.css_size,
            z_index: BEHIND_CONTENT_Z,
            interactive: false,
        }
    }

    /// Clear to transparent and stroke `lines` in order through `transform`.
    pub fn draw<'a>(&mut self, transform: Affine, lines: impl IntoIterator<Item = PolylineDraw<'a>>) {
        self.ctx.reset();
        self.ctx.set_transform(affine_to_cpu(transform));
        for line in lines {
            if line.points.len() < 2 {
                continue;
            }
            let [r, g, b, a] = line.color.to_straight_rgba8(line.opacity);
            if a == 0 {
                continue;
            }
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx
                .set_stroke(vello_cpu::kurbo::Stroke::new(line.width));
            self.ctx.stroke_path(&polyline_to_cpu(line.points));
        }
        self.ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Borrow the current pixels.
    pub fn view(&self) -> FrameView<'_> {
        let (width, height) = self.pixel_size();
        FrameView {
            width,
            height,
            data: self.pixmap.data_as_u8_slice(),
        }
    }

    /// Copy the current pixels into a straight-alpha image.
    pub fn to_rgba_image(&self) -> RevealResult<image::RgbaImage> {
        let (w, h) = self.pixel_size();
        let mut out = Vec::with_capacity(self.pixmap.data_as_u8_slice().len());
        for px in self.pixmap.data_as_u8_slice().chunks_exact(4) {
            let p = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&p.to_straight_rgba());
        }
        image::RgbaImage::from_raw(w, h, out)
            .ok_or_else(|| RevealError::surface("pixel buffer does not match surface extent"))
    }
}

fn physical_extent(css_size: Size, pixel_ratio: f64) -> RevealResult<(u16, u16)> {
    if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
        return Err(RevealError::surface(format!(
            "invalid pixel ratio {pixel_ratio}"
        )));
    }
    let (w, h) = css_size.to_physical(pixel_ratio);
    if w == 0 || h == 0 {
        return Err(RevealError::surface(format!(
            "surface has zero area ({w}x{h})"
        )));
    }
    let w: u16 = w
        .try_into()
        .map_err(|_| RevealError::surface(format!("surface width exceeds u16: {w}")))?;
    let h: u16 = h
        .try_into()
        .map_err(|_| RevealError::surface(format!("surface height exceeds u16: {h}")))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn polyline_to_cpu(points: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut it = points.iter();
    if let Some(p) = it.next() {
        out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y));
    }
    for p in it {
        out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
