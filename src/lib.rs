//! Pointer Motion - humanized mouse movement for browser automation
//!
//! This library turns "move the pointer from here to there" into a timed
//! sequence of intermediate positions and button transitions that look like
//! a person operating a mouse, and replays them through an abstract event
//! sink.
//!
//! ## Pipeline
//!
//! A move request enters a [`Pointer`], which plans a curved path with
//! Fitts's-law timing (`motion`), paces frames through the sink with
//! minimum-jerk velocity and tremor (`pointer::scheduler`), and optionally
//! overshoots and corrects. Clicks and drags compose moves with button
//! presses and short human pauses (`stealth`).

pub mod config;
pub mod input;
pub mod motion;
pub mod pointer;
pub mod stealth;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, MotionConfig};
pub use input::{DebugHook, EventSink, HookError, LogHook, RecordingSink, SinkError};
pub use pointer::{CursorState, MotionState, Pointer, PointerError};
pub use stealth::Humanizer;

/// A position in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `other`
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// Low-level events delivered to an [`EventSink`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// Pointer moved to an absolute position
    Move { x: f64, y: f64 },
    /// Button pressed at the current position
    Down { button: Button, click_count: u32 },
    /// Button released at the current position
    Up { button: Button, click_count: u32 },
}

impl PointerEvent {
    /// Position carried by a move event
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Move { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}
