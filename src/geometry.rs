//! Clipping a polar line `x·cos(theta) + y·sin(theta) = rho` to the image rectangle.

/// Trig components at or below this magnitude are treated as zero.
const TRIG_EPS: f64 = 1e-9;

/// Two distinct integer pixel coordinates inside `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LineSegment {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

/// Intersect the line with the borders `x = 0`, `x = width - 1`, `y = 0`,
/// `y = height - 1`, in that order, and return the first two distinct points.
///
/// A border pair is skipped when the trig component it divides by is within
/// `1e-9` of zero. Intersections are kept when the computed coordinate lies in
/// `[0, dimension)`, then rounded half away from zero. Returns `None` when the
/// line misses the rectangle or only touches it at one point.
pub fn segment_from_rho_theta(rho: f64, theta_rad: f64, width: usize, height: usize) -> Option<LineSegment> {
    if width == 0 || height == 0 {
        return None;
    }
    let (sin, cos) = theta_rad.sin_cos();
    let w = width as f64;
    let h = height as f64;
    let mut points: Vec<(i32, i32)> = Vec::with_capacity(4);

    let mut push = |x: f64, y: f64| {
        let p = (
            (x.round() as i32).min(width as i32 - 1),
            (y.round() as i32).min(height as i32 - 1),
        );
        if !points.contains(&p) {
            points.push(p);
        }
    };

    if sin.abs() > TRIG_EPS {
        for x in [0.0, w - 1.0] {
            let y = (rho - x * cos) / sin;
            if (0.0..h).contains(&y) {
                push(x, y);
            }
        }
    }
    if cos.abs() > TRIG_EPS {
        for y in [0.0, h - 1.0] {
            let x = (rho - y * sin) / cos;
            if (0.0..w).contains(&x) {
                push(x, y);
            }
        }
    }

    match points.as_slice() {
        [start, end, ..] => Some(LineSegment {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}
