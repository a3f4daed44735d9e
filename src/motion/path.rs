//! Curved path generation
//!
//! Builds cubic Bézier paths whose control points are pushed off the
//! start→end line, bending early and straightening near the target.

use rand::Rng;

use super::sample_range;
use crate::config::MotionConfig;
use crate::Point;

/// Parametric position of the first control point along the line
const FIRST_CONTROL_T: f64 = 0.3;
/// Parametric position of the second control point along the line
const SECOND_CONTROL_T: f64 = 0.7;
/// Below this distance a path is a straight segment
const MIN_CURVED_DISTANCE: f64 = 1.0;

/// A cubic Bézier curve in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Straight segment with control points on the line
    pub fn straight(start: Point, end: Point) -> Self {
        Self {
            p0: start,
            p1: start.lerp(end, FIRST_CONTROL_T),
            p2: start.lerp(end, SECOND_CONTROL_T),
            p3: end,
        }
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]`
    pub fn eval(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;

        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// Whether both endpoints coincide
    pub fn is_point(&self) -> bool {
        self.p0 == self.p3
    }
}

/// Build a curved path using the configured curvature bounds
pub fn build_path(
    start: Point,
    end: Point,
    config: &MotionConfig,
    rng: &mut impl Rng,
) -> CubicBezier {
    build_scaled_path(start, end, config, 1.0, rng)
}

/// Build a curved path with curvature bounds multiplied by `curvature_scale`.
///
/// Both control points sit on the same side of the line. The first gets the
/// larger of two independently drawn offsets; the second gets the smaller
/// one, further reduced by the asymmetry factor.
pub fn build_scaled_path(
    start: Point,
    end: Point,
    config: &MotionConfig,
    curvature_scale: f64,
    rng: &mut impl Rng,
) -> CubicBezier {
    let distance = start.distance_to(end);
    if distance < MIN_CURVED_DISTANCE {
        return CubicBezier::straight(start, end);
    }

    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let (nx, ny) = (-dy / distance, dx / distance);

    let min = config.curvature_min * curvature_scale;
    let max = config.curvature_max * curvature_scale;
    let first = sample_range(rng, min, max) * distance;
    let second = sample_range(rng, min, max) * distance;
    let (major, minor) = if first >= second {
        (first, second)
    } else {
        (second, first)
    };
    let minor = minor * (1.0 - config.curvature_asymmetry) / config.curvature_asymmetry;

    // Short hops barely bend
    let short_scale = if config.short_distance_threshold > 0.0 {
        (distance / config.short_distance_threshold).min(1.0)
    } else {
        1.0
    };
    let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };

    let offset = |t: f64, magnitude: f64| {
        let base = start.lerp(end, t);
        let m = magnitude * short_scale * side;
        Point::new(base.x + nx * m, base.y + ny * m)
    };

    CubicBezier {
        p0: start,
        p1: offset(FIRST_CONTROL_T, major),
        p2: offset(SECOND_CONTROL_T, minor),
        p3: end,
    }
}
