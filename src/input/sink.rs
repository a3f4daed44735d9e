//! Event delivery seams
//!
//! The engine never talks to a browser directly; it emits every low-level
//! event through an [`EventSink`] and reports frames to an optional
//! [`DebugHook`].

use async_trait::async_trait;

use crate::{Button, Point};

/// Transport that turns engine output into real input events.
///
/// Each call corresponds to exactly one low-level event.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Move the pointer to an absolute position
    async fn move_to(&self, x: f64, y: f64) -> Result<(), SinkError>;

    /// Press `button` at the current position
    async fn button_down(&self, button: Button, click_count: u32) -> Result<(), SinkError>;

    /// Release `button` at the current position
    async fn button_up(&self, button: Button, click_count: u32) -> Result<(), SinkError>;
}

/// Observer for visualizing motion.
///
/// Must return quickly; failures are logged and otherwise ignored.
pub trait DebugHook: Send + Sync {
    /// Called for every emitted frame
    fn on_frame(&self, point: Point) -> Result<(), HookError>;

    /// Called once per press/release pair, at the press
    fn on_click(&self, point: Point) -> Result<(), HookError>;
}

/// Debug hook that writes frames and clicks to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHook;

impl DebugHook for LogHook {
    fn on_frame(&self, point: Point) -> Result<(), HookError> {
        log::debug!("frame ({:.1}, {:.1})", point.x, point.y);
        Ok(())
    }

    fn on_click(&self, point: Point) -> Result<(), HookError> {
        log::debug!("click ({:.1}, {:.1})", point.x, point.y);
        Ok(())
    }
}

/// The event sink rejected a call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Event sink failed: {0}")]
pub struct SinkError(pub String);

/// A debug hook failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Debug hook failed: {0}")]
pub struct HookError(pub String);
