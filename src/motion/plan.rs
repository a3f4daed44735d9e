//! Motion plans
//!
//! A plan is the immutable description of one curved movement. A trajectory
//! is the one or two plans a single move request expands into.

use rand::Rng;

use super::duration::motion_duration;
use super::overshoot::{self, OvershootPlan};
use super::path::{build_path, build_scaled_path, CubicBezier};
use super::timewarp;
use crate::config::MotionConfig;
use crate::Point;

/// Moves shorter than this are a single frame
pub const MIN_MOTION_DISTANCE: f64 = 1.0;

/// One sampled position of a motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Noise-free position on the path
    pub position: Point,
    /// Normalized time in `[0, 1]`
    pub elapsed_fraction: f64,
}

/// One curved movement: path, duration and frame count
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlan {
    pub start: Point,
    pub end: Point,
    /// Planned duration in seconds
    pub duration: f64,
    pub path: CubicBezier,
    /// Number of frames emitted, the last one landing exactly on `end`
    pub frame_count: usize,
}

impl MotionPlan {
    /// Create a plan from already-built parts
    pub fn new(
        start: Point,
        end: Point,
        duration: f64,
        path: CubicBezier,
        config: &MotionConfig,
    ) -> Self {
        Self {
            start,
            end,
            duration,
            path,
            frame_count: frame_count(duration, config.frame_interval),
        }
    }

    /// A plan that jumps straight to `end` in one frame
    pub fn single_frame(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            duration: 0.0,
            path: CubicBezier::straight(start, end),
            frame_count: 1,
        }
    }

    /// Frame `index` in `1..=frame_count`
    pub fn frame(&self, index: usize) -> Frame {
        let elapsed_fraction = timewarp::progress_time(index, self.frame_count);
        Frame {
            position: timewarp::sample(&self.path, index, self.frame_count),
            elapsed_fraction,
        }
    }

    /// Normalized speed of frame `index`, used to scale tremor
    pub fn normalized_speed(&self, index: usize) -> f64 {
        timewarp::normalized_speed(timewarp::progress_time(index, self.frame_count))
    }

    /// All noise-free frames in emission order
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        (1..=self.frame_count).map(move |i| self.frame(i))
    }
}

/// Frames needed to cover `duration` at `frame_interval`, never zero
pub fn frame_count(duration: f64, frame_interval: f64) -> usize {
    if frame_interval <= 0.0 || !duration.is_finite() {
        return 1;
    }
    ((duration / frame_interval).round() as usize).max(1)
}

/// Everything emitted for one move request
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Primary plan, followed by the correction when overshooting
    pub plans: Vec<MotionPlan>,
    pub overshoot: Option<OvershootPlan>,
}

impl Trajectory {
    /// Plan a humanized move from `start` to `end`
    pub fn plan(start: Point, end: Point, config: &MotionConfig, rng: &mut impl Rng) -> Self {
        let distance = start.distance_to(end);
        if distance < MIN_MOTION_DISTANCE {
            return Self {
                plans: vec![MotionPlan::single_frame(start, end)],
                overshoot: None,
            };
        }

        let duration = motion_duration(distance, config);
        let overshoot = overshoot::plan(start, end, duration, config, rng);

        let plans = match overshoot {
            Some(ref os) => {
                let scale = config.correction_curvature_scale;
                let primary_path = build_path(start, os.target, config, rng);
                let correction_path = build_scaled_path(os.target, end, config, scale, rng);
                let primary =
                    MotionPlan::new(start, os.target, os.primary_duration, primary_path, config);
                let correction = MotionPlan::new(
                    os.target,
                    end,
                    os.correction_duration,
                    correction_path,
                    config,
                );
                vec![primary, correction]
            }
            None => {
                let path = build_path(start, end, config, rng);
                vec![MotionPlan::new(start, end, duration, path, config)]
            }
        };

        log::debug!(
            "Planned ({:.1}, {:.1}) -> ({:.1}, {:.1}): {:.1}px, {:.3}s, {} frames, overshoot {}",
            start.x,
            start.y,
            end.x,
            end.y,
            distance,
            duration,
            plans.iter().map(|p| p.frame_count).sum::<usize>(),
            overshoot.is_some()
        );

        Self { plans, overshoot }
    }

    /// Final resting point
    pub fn end(&self) -> Option<Point> {
        self.plans.last().map(|p| p.end)
    }

    /// Total frames across every plan
    pub fn frame_count(&self) -> usize {
        self.plans.iter().map(|p| p.frame_count).sum()
    }
}
