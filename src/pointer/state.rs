//! Cursor state tracking
//!
//! Holds the committed position and pressed buttons of one pointer, and
//! whether a motion is in flight.

use std::collections::BTreeSet;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{Button, Point};

/// Committed cursor state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorState {
    /// Last position acknowledged by the sink
    pub position: Point,
    /// Buttons currently held down
    pub pressed_buttons: BTreeSet<Button>,
}

impl CursorState {
    /// Cursor at the origin with nothing pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a button is held
    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed_buttons.contains(&button)
    }
}

/// Motion state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    /// No move-driven operation is running
    #[default]
    Idle,
    /// A move, click or drag is running
    InMotion,
}

#[derive(Debug, Default)]
struct Tracked {
    cursor: CursorState,
    motion: MotionState,
}

/// Shared, lock-protected state of one pointer
#[derive(Debug, Default)]
pub(crate) struct Tracker {
    inner: RwLock<Tracked>,
}

impl Tracker {
    pub(crate) fn snapshot(&self) -> CursorState {
        self.read().cursor.clone()
    }

    pub(crate) fn position(&self) -> Point {
        self.read().cursor.position
    }

    pub(crate) fn motion_state(&self) -> MotionState {
        self.read().motion
    }

    pub(crate) fn set_motion(&self, motion: MotionState) {
        self.write().motion = motion;
    }

    pub(crate) fn commit_position(&self, position: Point) {
        self.write().cursor.position = position;
    }

    pub(crate) fn press(&self, button: Button) {
        self.write().cursor.pressed_buttons.insert(button);
    }

    /// Returns whether the button was held
    pub(crate) fn release(&self, button: Button) -> bool {
        self.write().cursor.pressed_buttons.remove(&button)
    }

    fn read(&self) -> RwLockReadGuard<'_, Tracked> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tracked> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// One running operation.
///
/// `position` follows every acknowledged frame but only reaches the tracker
/// on [`commit`](OpGuard::commit) or drop, so readers never see a motion
/// half-applied. Dropping also returns the state machine to idle.
pub(crate) struct OpGuard<'a> {
    tracker: &'a Tracker,
    in_flight: &'a Mutex<Option<CancellationToken>>,
    pub(crate) cancel: CancellationToken,
    pub(crate) position: Point,
}

impl<'a> OpGuard<'a> {
    pub(crate) fn begin(
        tracker: &'a Tracker,
        in_flight: &'a Mutex<Option<CancellationToken>>,
        cancel: CancellationToken,
        motion: bool,
    ) -> Self {
        *in_flight.lock().unwrap_or_else(|e| e.into_inner()) = Some(cancel.clone());
        if motion {
            tracker.set_motion(MotionState::InMotion);
        }
        Self {
            tracker,
            in_flight,
            cancel,
            position: tracker.position(),
        }
    }

    pub(crate) fn commit(&self) {
        self.tracker.commit_position(self.position);
    }
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        self.commit();
        self.tracker.set_motion(MotionState::Idle);
        *self.in_flight.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
