//! Physiological tremor
//!
//! Gaussian jitter that is strongest when the hand is nearly still and
//! fades (down to a floor) at peak speed.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::MotionConfig;
use crate::Point;

/// Standard deviation for a frame moving at `normalized_speed` (0..=1)
pub fn tremor_sigma(normalized_speed: f64, config: &MotionConfig) -> f64 {
    config.tremor_amplitude * (1.0 - normalized_speed.clamp(0.0, 1.0)) + config.tremor_floor
}

/// Add independent per-axis Gaussian noise to `point`
pub fn perturb(
    point: Point,
    normalized_speed: f64,
    config: &MotionConfig,
    rng: &mut impl Rng,
) -> Point {
    let sigma = tremor_sigma(normalized_speed, config);
    if sigma <= 0.0 {
        return point;
    }

    let Ok(noise) = Normal::new(0.0, sigma) else {
        return point;
    };
    Point::new(point.x + noise.sample(rng), point.y + noise.sample(rng))
}
