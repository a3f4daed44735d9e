//! In-memory event sink
//!
//! Records every event instead of delivering it. Used for dry runs and for
//! inspecting the exact event stream a pointer produces.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::sink::{EventSink, SinkError};
use crate::{Button, Point, PointerEvent};

/// Sink that keeps every event in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PointerEvent>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<PointerEvent> {
        self.lock().clone()
    }

    /// Positions of all move events, in order
    pub fn moves(&self) -> Vec<Point> {
        self.lock().iter().filter_map(PointerEvent::position).collect()
    }

    /// Number of press events
    pub fn presses(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| matches!(e, PointerEvent::Down { .. }))
            .count()
    }

    /// Number of release events
    pub fn releases(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| matches!(e, PointerEvent::Up { .. }))
            .count()
    }

    /// Total number of events
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, event: PointerEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PointerEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn move_to(&self, x: f64, y: f64) -> Result<(), SinkError> {
        self.push(PointerEvent::Move { x, y });
        Ok(())
    }

    async fn button_down(&self, button: Button, click_count: u32) -> Result<(), SinkError> {
        self.push(PointerEvent::Down { button, click_count });
        Ok(())
    }

    async fn button_up(&self, button: Button, click_count: u32) -> Result<(), SinkError> {
        self.push(PointerEvent::Up { button, click_count });
        Ok(())
    }
}
