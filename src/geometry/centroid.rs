use log::debug;

use crate::domain::Ring;

/// Signed areas smaller than this are treated as zero
pub const AREA_EPSILON: f64 = 1e-12;

/// Planar centroid of a polygon ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    /// True when the ring's signed area was numerically zero and the
    /// centroid fell back to the arithmetic mean of the vertices
    pub degenerate: bool,
}

/// Signed shoelace area of a vertex loop (positive = counter-clockwise)
pub fn signed_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        sum += x0 * y1 - x1 * y0;
    }
    0.5 * sum
}

/// Area-weighted centroid of the ring via the shoelace formula.
///
/// The duplicate closing vertex, if present, is dropped before the
/// summation so it is never counted twice. The result is independent of
/// winding order: the signed area appears in both numerator and
/// denominator, so its sign cancels.
///
/// Rings with numerically zero area (collinear or coincident vertices)
/// fall back to the plain vertex mean, flagged on the result. That is an
/// approximation, not a geometric centroid.
pub fn polygon_centroid(ring: &Ring) -> Centroid {
    let points = ring.open_points();
    let n = points.len();

    let area = signed_area(points);
    if area.abs() < AREA_EPSILON {
        debug!("ring area is numerically zero, falling back to vertex mean");
        return vertex_mean(points);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % n];
        let cross = x0 * y1 - x1 * y0;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }

    let factor = 1.0 / (6.0 * area);
    Centroid {
        x: cx * factor,
        y: cy * factor,
        degenerate: false,
    }
}

fn vertex_mean(points: &[(f64, f64)]) -> Centroid {
    if points.is_empty() {
        return Centroid {
            x: 0.0,
            y: 0.0,
            degenerate: true,
        };
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x, sy + y));
    Centroid {
        x: sx / n,
        y: sy / n,
        degenerate: true,
    }
}
