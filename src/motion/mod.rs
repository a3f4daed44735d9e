//! Motion synthesis module
//!
//! Pure models that turn a start and end point into a timed sequence of
//! frames:
//! - Fitts's-law duration
//! - Asymmetric cubic Bézier paths
//! - Minimum-jerk time warping
//! - Speed-scaled tremor
//! - Overshoot and correction

pub mod duration;
pub mod overshoot;
pub mod path;
pub mod plan;
pub mod timewarp;
pub mod tremor;

use rand::Rng;

pub use duration::{fitts_duration, motion_duration};
pub use overshoot::OvershootPlan;
pub use path::CubicBezier;
pub use plan::{Frame, MotionPlan, Trajectory};

/// Uniform draw from `[min, max]`, tolerating an empty range
pub(crate) fn sample_range(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}
