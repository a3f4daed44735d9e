//! Minimum-jerk time warping
//!
//! Maps uniform time to progress along the path so the cursor accelerates
//! out of the start and decelerates into the target.

use super::path::CubicBezier;
use crate::Point;

/// Peak of `30u²(1-u)²`, reached at `u = 0.5`
pub const PEAK_SPEED: f64 = 1.875;

/// Progress along the path at normalized time `u`: `10u³ - 15u⁴ + 6u⁵`
pub fn minimum_jerk(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    u * u * u * (10.0 - 15.0 * u + 6.0 * u * u)
}

/// Derivative of [`minimum_jerk`]: `30u²(1-u)²`
pub fn minimum_jerk_speed(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    let v = u * (1.0 - u);
    30.0 * v * v
}

/// Speed scaled into `[0, 1]`
pub fn normalized_speed(u: f64) -> f64 {
    minimum_jerk_speed(u) / PEAK_SPEED
}

/// Normalized time for frame `index` of `frame_count`
pub fn progress_time(index: usize, frame_count: usize) -> f64 {
    if frame_count == 0 {
        return 1.0;
    }
    (index as f64 / frame_count as f64).clamp(0.0, 1.0)
}

/// Raw (noise-free) position of frame `index` of `frame_count`
pub fn sample(path: &CubicBezier, index: usize, frame_count: usize) -> Point {
    path.eval(minimum_jerk(progress_time(index, frame_count)))
}
