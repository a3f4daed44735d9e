//! Human behavior simulation
//!
//! Owns the random source behind every stochastic decision (curvature,
//! tremor, overshoot) and samples the human pauses around clicks and drags.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{MotionConfig, MIN_FRAME_INTERVAL};
use crate::motion::sample_range;

/// Humanizer for generating realistic timing and randomness
#[derive(Debug, Clone)]
pub struct Humanizer {
    rng: StdRng,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Humanizer {
    /// Create a new humanizer seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic humanizer (for testing and replays)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random source shared by the motion models
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Pause between arriving on a target and pressing
    pub fn pre_click_pause(&mut self, config: &MotionConfig) -> Duration {
        self.uniform_secs(config.pre_click_pause_min, config.pre_click_pause_max)
    }

    /// How long a button stays down during a click
    pub fn click_hold(&mut self, config: &MotionConfig) -> Duration {
        self.uniform_secs(config.click_hold_min, config.click_hold_max)
    }

    /// Gap between repetitions of a multi-click
    pub fn double_click_interval(&mut self, config: &MotionConfig) -> Duration {
        self.uniform_secs(config.double_click_interval_min, config.double_click_interval_max)
    }

    /// Pause after pressing, before a drag starts moving
    pub fn drag_start_pause(&mut self, config: &MotionConfig) -> Duration {
        self.uniform_secs(config.drag_start_pause_min, config.drag_start_pause_max)
    }

    /// Pause after a drag arrives, before releasing
    pub fn drag_end_pause(&mut self, config: &MotionConfig) -> Duration {
        self.uniform_secs(config.drag_end_pause_min, config.drag_end_pause_max)
    }

    /// Gap until the next frame: the frame interval with jitter
    pub fn frame_delay(&mut self, config: &MotionConfig) -> Duration {
        let jitter = config.frame_interval_variance;
        let delay = config.frame_interval + sample_range(&mut self.rng, -jitter, jitter);
        Duration::from_secs_f64(delay.max(MIN_FRAME_INTERVAL))
    }

    /// Occasional hesitation inserted between frames
    pub fn micro_pause(&mut self, config: &MotionConfig) -> Option<Duration> {
        if self.should(config.micro_pause_probability) {
            Some(self.uniform_secs(config.micro_pause_min, config.micro_pause_max))
        } else {
            None
        }
    }

    /// Bernoulli trial with the given probability
    pub fn should(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    fn uniform_secs(&mut self, min: f64, max: f64) -> Duration {
        Duration::from_secs_f64(sample_range(&mut self.rng, min, max).max(0.0))
    }
}
