use crate::foundation::core::Point;
use crate::foundation::error::{RevealError, RevealResult};

/// Knot spacing below this is treated as coincident points.
const KNOT_EPS: f64 = 1e-4;

/// Upper bound on segments per sampled curve.
pub const MAX_CURVE_SEGMENTS: usize = 4096;

/// Sample a centripetal Catmull-Rom spline through `control` at `segments + 1` uniform parameter
/// steps (`t = i / segments` over the whole curve).
///
/// The curve passes through every control point; the first and last samples are exactly the
/// first and last control points. Open ends use reflected phantom points.
pub fn sample_curve(control: &[Point], segments: usize) -> RevealResult<Vec<Point>> {
    if control.len() < 2 {
        return Err(RevealError::validation(
            "curve needs at least 2 control points",
        ));
    }
    if segments == 0 || segments > MAX_CURVE_SEGMENTS {
        return Err(RevealError::validation(format!(
            "curve segments must be in 1..={MAX_CURVE_SEGMENTS}, got {segments}"
        )));
    }
    let Some(len) = segments.checked_add(1) else {
        return Err(RevealError::validation("curve segment count overflows"));
    };
    if control.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(RevealError::validation("curve control points must be finite"));
    }

    let mut out = Vec::with_capacity(len);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        out.push(point_at(control, t));
    }
    Ok(out)
}

fn point_at(pts: &[Point], t: f64) -> Point {
    let last = pts.len() - 1;
    let p = last as f64 * t;
    let mut seg = p.floor() as usize;
    let mut w = p - seg as f64;
    if seg >= last {
        seg = last - 1;
        w = 1.0;
    }

    let p1 = pts[seg];
    let p2 = pts[seg + 1];
    let p0 = if seg > 0 {
        pts[seg - 1]
    } else {
        p1 + (p1 - p2)
    };
    let p3 = if seg + 2 <= last {
        pts[seg + 2]
    } else {
        p2 + (p2 - p1)
    };

    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);
    if dt1 < KNOT_EPS {
        dt1 = 1.0;
    }
    if dt0 < KNOT_EPS {
        dt0 = dt1;
    }
    if dt2 < KNOT_EPS {
        dt2 = dt1;
    }

    let x = Cubic::nonuniform(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2);
    let y = Cubic::nonuniform(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2);
    Point::new(x.eval(w), y.eval(w))
}

/// One coordinate of a Hermite segment in power basis.
#[derive(Clone, Copy, Debug)]
struct Cubic {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl Cubic {
    fn hermite(x0: f64, x1: f64, t0: f64, t1: f64) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Tangents from non-uniform knot spacing, rescaled to the `[0, 1]` span of the middle
    /// segment.
    #[allow(clippy::too_many_arguments)]
    fn nonuniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        let t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        Self::hermite(x1, x2, t1 * dt1, t2 * dt1)
    }

    fn eval(self, t: f64) -> f64 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/sampler.rs"]
mod tests;
