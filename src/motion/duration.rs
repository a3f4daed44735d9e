//! Movement time from distance
//!
//! Fitts's law: `MT = a + b * log2(D / W + 1)`.

use crate::config::MotionConfig;

/// Raw Fitts's-law movement time in seconds.
///
/// Non-positive distances collapse to the intercept.
pub fn fitts_duration(distance: f64, target_width: f64, a: f64, b: f64) -> f64 {
    if distance <= 0.0 {
        return a;
    }
    a + b * (distance / target_width + 1.0).log2()
}

/// Movement time for a motion of `distance` pixels, clamped to the configured bounds
pub fn motion_duration(distance: f64, config: &MotionConfig) -> f64 {
    fitts_duration(distance, config.target_width, config.fitts_a, config.fitts_b)
        .clamp(config.min_duration, config.max_duration)
}
