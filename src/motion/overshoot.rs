//! Overshoot planning
//!
//! Fast, long reaches sometimes land past the target and are corrected by a
//! short second movement.

use rand::Rng;

use super::sample_range;
use crate::config::MotionConfig;
use crate::Point;

/// A decided overshoot: where to aim first and how to split the time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvershootPlan {
    /// Point past the real target reached by the primary motion
    pub target: Point,
    /// Extension past the target as a fraction of the distance
    pub extension: f64,
    /// Time spent on the primary motion (seconds)
    pub primary_duration: f64,
    /// Time spent on the corrective motion (seconds)
    pub correction_duration: f64,
}

/// Whether a motion is fast and long enough to be considered at all.
///
/// The primary share must also exceed `min_duration`, so the correction
/// always ends up the shorter of the two.
pub fn is_eligible(distance: f64, duration: f64, config: &MotionConfig) -> bool {
    let primary = duration * (1.0 - config.correction_duration_fraction);
    distance > config.overshoot_min_distance
        && duration > config.overshoot_min_duration
        && primary > config.min_duration
}

/// Decide whether the motion `start → end` overshoots.
///
/// Returns `None` for ineligible motions and for eligible ones that lose the
/// `overshoot_probability` draw.
pub fn plan(
    start: Point,
    end: Point,
    duration: f64,
    config: &MotionConfig,
    rng: &mut impl Rng,
) -> Option<OvershootPlan> {
    let distance = start.distance_to(end);
    if !is_eligible(distance, duration, config) {
        return None;
    }
    if rng.gen::<f64>() >= config.overshoot_probability {
        return None;
    }

    let extension = sample_range(rng, config.overshoot_distance_min, config.overshoot_distance_max);
    let target = Point::new(
        end.x + (end.x - start.x) * extension,
        end.y + (end.y - start.y) * extension,
    );

    let correction = config.correction_duration_fraction;
    Some(OvershootPlan {
        target,
        extension,
        primary_duration: (duration * (1.0 - correction)).max(config.min_duration),
        correction_duration: (duration * correction).max(config.min_duration),
    })
}
