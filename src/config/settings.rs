//! Motion tuning parameters
//!
//! Defines every knob consumed by the duration, path, tremor, overshoot and
//! timing models.

use serde::{Deserialize, Serialize};

/// Shortest frame spacing the scheduler can honor (seconds)
pub const MIN_FRAME_INTERVAL: f64 = 0.001;

/// Ceiling on every time-valued field (seconds)
pub const MAX_SECONDS: f64 = 60.0;

/// Upper bound (exclusive) on the corrective sub-motion's share of the time
pub const MAX_CORRECTION_FRACTION: f64 = 0.5;

/// Main motion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Duration law intercept (seconds)
    pub fitts_a: f64,
    /// Duration law slope (seconds per bit)
    pub fitts_b: f64,
    /// Nominal target width used by the duration law (pixels)
    pub target_width: f64,

    /// Nominal spacing between frames (seconds)
    pub frame_interval: f64,
    /// Uniform jitter applied to each frame deadline (seconds, ±)
    pub frame_interval_variance: f64,

    /// Lower bend bound as a fraction of distance
    pub curvature_min: f64,
    /// Upper bend bound as a fraction of distance
    pub curvature_max: f64,
    /// Share of the bend carried by the first control point (0.5..=1)
    pub curvature_asymmetry: f64,
    /// Moves shorter than this get proportionally less curvature (pixels)
    pub short_distance_threshold: f64,

    /// Tremor scale at rest (pixels)
    pub tremor_amplitude: f64,
    /// Tremor floor at peak speed (pixels, strictly positive)
    pub tremor_floor: f64,

    /// Probability that an eligible motion overshoots
    pub overshoot_probability: f64,
    /// Smallest overshoot extension (fraction of distance)
    pub overshoot_distance_min: f64,
    /// Largest overshoot extension (fraction of distance)
    pub overshoot_distance_max: f64,
    /// Motions must be longer than this to overshoot (pixels)
    pub overshoot_min_distance: f64,
    /// Motions must last longer than this to overshoot (seconds)
    pub overshoot_min_duration: f64,
    /// Share of the planned duration spent on the corrective sub-motion (below 0.5)
    pub correction_duration_fraction: f64,
    /// Curvature bound multiplier for the corrective sub-motion
    pub correction_curvature_scale: f64,

    /// Pause before pressing, after arriving (seconds)
    pub pre_click_pause_min: f64,
    pub pre_click_pause_max: f64,
    /// Time a button stays pressed during a click (seconds)
    pub click_hold_min: f64,
    pub click_hold_max: f64,
    /// Gap between repetitions of a multi-click (seconds)
    pub double_click_interval_min: f64,
    pub double_click_interval_max: f64,
    /// Pause after pressing, before dragging (seconds)
    pub drag_start_pause_min: f64,
    pub drag_start_pause_max: f64,
    /// Pause after dragging, before releasing (seconds)
    pub drag_end_pause_min: f64,
    pub drag_end_pause_max: f64,

    /// Per-frame probability of a short hesitation
    pub micro_pause_probability: f64,
    pub micro_pause_min: f64,
    pub micro_pause_max: f64,

    /// Duration clamp (seconds)
    pub min_duration: f64,
    pub max_duration: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            fitts_a: 0.070,
            fitts_b: 0.150,
            target_width: 20.0,
            frame_interval: 0.012,
            frame_interval_variance: 0.004,
            curvature_min: 0.10,
            curvature_max: 0.30,
            curvature_asymmetry: 0.6,
            short_distance_threshold: 50.0,
            tremor_amplitude: 1.0,
            tremor_floor: 0.2,
            overshoot_probability: 0.70,
            overshoot_distance_min: 0.03,
            overshoot_distance_max: 0.12,
            overshoot_min_distance: 200.0,
            overshoot_min_duration: 0.25,
            correction_duration_fraction: 0.15,
            correction_curvature_scale: 0.3,
            pre_click_pause_min: 0.05,
            pre_click_pause_max: 0.20,
            click_hold_min: 0.05,
            click_hold_max: 0.15,
            double_click_interval_min: 0.05,
            double_click_interval_max: 0.10,
            drag_start_pause_min: 0.08,
            drag_start_pause_max: 0.20,
            drag_end_pause_min: 0.05,
            drag_end_pause_max: 0.15,
            micro_pause_probability: 0.03,
            micro_pause_min: 0.015,
            micro_pause_max: 0.04,
            min_duration: 0.08,
            max_duration: 2.5,
        }
    }
}

impl MotionConfig {
    /// Create a config with no pauses, jitter or overshoot (for testing).
    ///
    /// Tremor keeps its floor.
    pub fn instant() -> Self {
        Self {
            frame_interval_variance: 0.0,
            tremor_amplitude: 0.0,
            overshoot_probability: 0.0,
            pre_click_pause_min: 0.0,
            pre_click_pause_max: 0.0,
            click_hold_min: 0.0,
            click_hold_max: 0.0,
            double_click_interval_min: 0.0,
            double_click_interval_max: 0.0,
            drag_start_pause_min: 0.0,
            drag_start_pause_max: 0.0,
            drag_end_pause_min: 0.0,
            drag_end_pause_max: 0.0,
            micro_pause_probability: 0.0,
            ..Default::default()
        }
    }

    /// Create a slower, shakier config
    pub fn careful() -> Self {
        Self {
            fitts_a: 0.120,
            fitts_b: 0.200,
            tremor_amplitude: 1.6,
            overshoot_probability: 0.5,
            pre_click_pause_min: 0.12,
            pre_click_pause_max: 0.35,
            micro_pause_probability: 0.06,
            max_duration: 3.5,
            ..Default::default()
        }
    }

    /// Parse a JSON document and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for finiteness, range and bound ordering
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("fitts_a", self.fitts_a),
            ("fitts_b", self.fitts_b),
            ("target_width", self.target_width),
            ("frame_interval", self.frame_interval),
            ("frame_interval_variance", self.frame_interval_variance),
            ("curvature_min", self.curvature_min),
            ("curvature_max", self.curvature_max),
            ("curvature_asymmetry", self.curvature_asymmetry),
            ("short_distance_threshold", self.short_distance_threshold),
            ("tremor_amplitude", self.tremor_amplitude),
            ("tremor_floor", self.tremor_floor),
            ("overshoot_probability", self.overshoot_probability),
            ("overshoot_distance_min", self.overshoot_distance_min),
            ("overshoot_distance_max", self.overshoot_distance_max),
            ("overshoot_min_distance", self.overshoot_min_distance),
            ("overshoot_min_duration", self.overshoot_min_duration),
            ("correction_duration_fraction", self.correction_duration_fraction),
            ("correction_curvature_scale", self.correction_curvature_scale),
            ("pre_click_pause_min", self.pre_click_pause_min),
            ("pre_click_pause_max", self.pre_click_pause_max),
            ("click_hold_min", self.click_hold_min),
            ("click_hold_max", self.click_hold_max),
            ("double_click_interval_min", self.double_click_interval_min),
            ("double_click_interval_max", self.double_click_interval_max),
            ("drag_start_pause_min", self.drag_start_pause_min),
            ("drag_start_pause_max", self.drag_start_pause_max),
            ("drag_end_pause_min", self.drag_end_pause_min),
            ("drag_end_pause_max", self.drag_end_pause_max),
            ("micro_pause_probability", self.micro_pause_probability),
            ("micro_pause_min", self.micro_pause_min),
            ("micro_pause_max", self.micro_pause_max),
            ("min_duration", self.min_duration),
            ("max_duration", self.max_duration),
        ];

        // Everything is a non-negative real
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        let seconds = [
            ("frame_interval", self.frame_interval),
            ("frame_interval_variance", self.frame_interval_variance),
            ("overshoot_min_duration", self.overshoot_min_duration),
            ("pre_click_pause_min", self.pre_click_pause_min),
            ("pre_click_pause_max", self.pre_click_pause_max),
            ("click_hold_min", self.click_hold_min),
            ("click_hold_max", self.click_hold_max),
            ("double_click_interval_min", self.double_click_interval_min),
            ("double_click_interval_max", self.double_click_interval_max),
            ("drag_start_pause_min", self.drag_start_pause_min),
            ("drag_start_pause_max", self.drag_start_pause_max),
            ("drag_end_pause_min", self.drag_end_pause_min),
            ("drag_end_pause_max", self.drag_end_pause_max),
            ("micro_pause_min", self.micro_pause_min),
            ("micro_pause_max", self.micro_pause_max),
            ("min_duration", self.min_duration),
            ("max_duration", self.max_duration),
        ];
        for (field, value) in seconds {
            if value > MAX_SECONDS {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        let unit = [
            ("curvature_min", self.curvature_min),
            ("curvature_max", self.curvature_max),
            ("overshoot_probability", self.overshoot_probability),
            ("overshoot_distance_min", self.overshoot_distance_min),
            ("overshoot_distance_max", self.overshoot_distance_max),
            ("correction_duration_fraction", self.correction_duration_fraction),
            ("correction_curvature_scale", self.correction_curvature_scale),
            ("micro_pause_probability", self.micro_pause_probability),
        ];
        for (field, value) in unit {
            if value > 1.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        if self.frame_interval < MIN_FRAME_INTERVAL {
            return Err(ConfigError::OutOfRange {
                field: "frame_interval",
                value: self.frame_interval,
            });
        }
        // The shortest jittered gap must still be one the scheduler can honor
        if self.frame_interval - self.frame_interval_variance < MIN_FRAME_INTERVAL {
            return Err(ConfigError::OutOfRange {
                field: "frame_interval_variance",
                value: self.frame_interval_variance,
            });
        }
        if self.correction_duration_fraction >= MAX_CORRECTION_FRACTION {
            return Err(ConfigError::OutOfRange {
                field: "correction_duration_fraction",
                value: self.correction_duration_fraction,
            });
        }
        if self.tremor_floor <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "tremor_floor",
                value: self.tremor_floor,
            });
        }
        if self.target_width <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "target_width",
                value: self.target_width,
            });
        }
        if !(0.5..=1.0).contains(&self.curvature_asymmetry) {
            return Err(ConfigError::OutOfRange {
                field: "curvature_asymmetry",
                value: self.curvature_asymmetry,
            });
        }
        if self.min_duration <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "min_duration",
                value: self.min_duration,
            });
        }

        let bounds = [
            ("curvature_min", self.curvature_min, "curvature_max", self.curvature_max),
            (
                "overshoot_distance_min",
                self.overshoot_distance_min,
                "overshoot_distance_max",
                self.overshoot_distance_max,
            ),
            (
                "pre_click_pause_min",
                self.pre_click_pause_min,
                "pre_click_pause_max",
                self.pre_click_pause_max,
            ),
            ("click_hold_min", self.click_hold_min, "click_hold_max", self.click_hold_max),
            (
                "double_click_interval_min",
                self.double_click_interval_min,
                "double_click_interval_max",
                self.double_click_interval_max,
            ),
            (
                "drag_start_pause_min",
                self.drag_start_pause_min,
                "drag_start_pause_max",
                self.drag_start_pause_max,
            ),
            (
                "drag_end_pause_min",
                self.drag_end_pause_min,
                "drag_end_pause_max",
                self.drag_end_pause_max,
            ),
            ("micro_pause_min", self.micro_pause_min, "micro_pause_max", self.micro_pause_max),
            ("min_duration", self.min_duration, "max_duration", self.max_duration),
        ];
        for (min_field, min, max_field, max) in bounds {
            if min > max {
                return Err(ConfigError::InvertedBounds {
                    min_field,
                    max_field,
                });
            }
        }

        Ok(())
    }
}

/// Configuration errors, raised at load time only
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("{min_field} must not exceed {max_field}")]
    InvertedBounds {
        min_field: &'static str,
        max_field: &'static str,
    },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.fitts_a, 0.070);
        assert_eq!(config.fitts_b, 0.150);
        assert_eq!(config.frame_interval, 0.012);
        assert_eq!(config.overshoot_probability, 0.70);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(MotionConfig::instant().validate().is_ok());
        assert!(MotionConfig::careful().validate().is_ok());
    }

    #[test]
    fn test_inverted_duration_bounds() {
        let config = MotionConfig {
            min_duration: 3.0,
            max_duration: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                min_field: "min_duration",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_curvature_bounds() {
        let config = MotionConfig {
            curvature_min: 0.5,
            curvature_max: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_probability_out_of_range() {
        let config = MotionConfig {
            overshoot_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "overshoot_probability",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = MotionConfig {
            tremor_amplitude: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "tremor_amplitude"
            })
        ));
    }

    #[test]
    fn test_zero_frame_interval_rejected() {
        let config = MotionConfig {
            frame_interval: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sub_millisecond_frame_interval_rejected() {
        let config = MotionConfig {
            frame_interval: 0.0001,
            frame_interval_variance: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "frame_interval",
                ..
            })
        ));
    }

    #[test]
    fn test_variance_must_leave_room_below_interval() {
        let config = MotionConfig {
            frame_interval: 0.012,
            frame_interval_variance: 0.012,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "frame_interval_variance",
                ..
            })
        ));

        let config = MotionConfig {
            frame_interval: 0.012,
            frame_interval_variance: 0.0115,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_correction_fraction_must_stay_below_half() {
        let config = MotionConfig {
            correction_duration_fraction: 0.9,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "correction_duration_fraction",
                ..
            })
        ));

        let config = MotionConfig {
            correction_duration_fraction: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MotionConfig {
            correction_duration_fraction: 0.45,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_pauses_rejected() {
        let config = MotionConfig {
            pre_click_pause_min: 1e300,
            pre_click_pause_max: 1e300,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "pre_click_pause_min",
                ..
            })
        ));

        let config = MotionConfig {
            max_duration: 120.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tremor_floor_rejected() {
        let config = MotionConfig {
            tremor_floor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "tremor_floor",
                ..
            })
        ));

        // Amplitude alone may be switched off
        let config = MotionConfig {
            tremor_amplitude: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = MotionConfig::from_json(r#"{"fitts_a": 0.1, "tremor_amplitude": 2.0}"#)
            .expect("valid json");
        assert_eq!(config.fitts_a, 0.1);
        assert_eq!(config.tremor_amplitude, 2.0);
        assert_eq!(config.fitts_b, MotionConfig::default().fitts_b);
    }

    #[test]
    fn test_json_validation_runs() {
        let result = MotionConfig::from_json(r#"{"min_duration": 5.0, "max_duration": 1.0}"#);
        assert!(matches!(result, Err(ConfigError::InvertedBounds { .. })));

        let result = MotionConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
