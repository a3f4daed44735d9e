//! Configuration module
//!
//! Handles the tunable parameters of the motion models and their validation.

pub mod settings;

pub use settings::{
    ConfigError, MotionConfig, MAX_CORRECTION_FRACTION, MAX_SECONDS, MIN_FRAME_INTERVAL,
};
