//! Pointer module
//!
//! A [`Pointer`] is one virtual mouse. It owns the cursor state, serializes
//! every operation issued against it, and composes moves with button
//! presses into clicks and drags.

pub mod scheduler;
pub mod state;

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::config::{ConfigError, MotionConfig};
use crate::input::{DebugHook, EventSink, SinkError};
use crate::motion::Trajectory;
use crate::stealth::Humanizer;
use crate::{Button, Point};

pub use scheduler::{pause, FrameScheduler};
pub use state::{CursorState, MotionState};

use state::{OpGuard, Tracker};

/// A virtual mouse driving an event sink
pub struct Pointer {
    sink: Arc<dyn EventSink>,
    hook: Option<Arc<dyn DebugHook>>,
    config: MotionConfig,
    tracker: Tracker,
    /// Random source; holding the lock is what serializes operations
    humanizer: tokio::sync::Mutex<Humanizer>,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl Pointer {
    /// Create a pointer at the origin with nothing pressed.
    ///
    /// The configuration is validated here, never mid-motion.
    pub fn new(sink: Arc<dyn EventSink>, config: MotionConfig) -> Result<Self, PointerError> {
        config.validate()?;
        Ok(Self {
            sink,
            hook: None,
            config,
            tracker: Tracker::default(),
            humanizer: tokio::sync::Mutex::new(Humanizer::new()),
            in_flight: Mutex::new(None),
        })
    }

    /// Attach a debug hook
    pub fn with_debug_hook(mut self, hook: Arc<dyn DebugHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Replace the random source (e.g. with [`Humanizer::seeded`])
    pub fn with_humanizer(mut self, humanizer: Humanizer) -> Self {
        self.humanizer = tokio::sync::Mutex::new(humanizer);
        self
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Committed cursor position
    pub fn position(&self) -> Point {
        self.tracker.position()
    }

    /// Buttons currently held
    pub fn pressed_buttons(&self) -> BTreeSet<Button> {
        self.tracker.snapshot().pressed_buttons
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.tracker.snapshot().is_pressed(button)
    }

    /// Snapshot of the committed cursor state
    pub fn state(&self) -> CursorState {
        self.tracker.snapshot()
    }

    pub fn motion_state(&self) -> MotionState {
        self.tracker.motion_state()
    }

    /// Cancel the operation currently running, if any.
    ///
    /// Queued operations are unaffected. Returns whether anything was running.
    pub fn cancel(&self) -> bool {
        match self.in_flight.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Move to `target`, along a human-like path when `humanize` is set
    pub async fn move_to(&self, target: Point, humanize: bool) -> Result<(), PointerError> {
        self.move_to_with_cancel(target, humanize, &CancellationToken::new())
            .await
    }

    /// [`move_to`](Self::move_to) that also stops when `cancel` fires
    pub async fn move_to_with_cancel(
        &self,
        target: Point,
        humanize: bool,
        cancel: &CancellationToken,
    ) -> Result<(), PointerError> {
        validate_point(target)?;

        let mut humanizer = self.humanizer.lock().await;
        let mut op = self.begin(cancel, true);
        self.travel(&mut humanizer, &mut op, target, humanize).await
    }

    /// Press `button` at the current position
    pub async fn down(&self, button: Button) -> Result<(), PointerError> {
        let _humanizer = self.humanizer.lock().await;
        let op = self.begin(&CancellationToken::new(), false);
        self.press(&op, button, 1).await
    }

    /// Release `button` at the current position.
    ///
    /// The release is sent even when the button is not held; the tracked
    /// state is unchanged in that case.
    pub async fn up(&self, button: Button) -> Result<(), PointerError> {
        let _humanizer = self.humanizer.lock().await;
        let op = self.begin(&CancellationToken::new(), false);
        self.release(&op, button, 1).await
    }

    /// Move to `target` and click `click_count` times
    pub async fn click(
        &self,
        target: Point,
        button: Button,
        click_count: u32,
        humanize: bool,
    ) -> Result<(), PointerError> {
        self.click_with_cancel(target, button, click_count, humanize, &CancellationToken::new())
            .await
    }

    /// [`click`](Self::click) that also stops when `cancel` fires
    pub async fn click_with_cancel(
        &self,
        target: Point,
        button: Button,
        click_count: u32,
        humanize: bool,
        cancel: &CancellationToken,
    ) -> Result<(), PointerError> {
        validate_point(target)?;
        if click_count < 1 {
            return Err(PointerError::InvalidRequest(
                "click count must be at least 1".to_string(),
            ));
        }

        let mut humanizer = self.humanizer.lock().await;
        let mut op = self.begin(cancel, true);
        self.travel(&mut humanizer, &mut op, target, humanize).await?;

        if humanize {
            pause(humanizer.pre_click_pause(&self.config), &op.cancel).await?;
        }

        for count in 1..=click_count {
            self.press(&op, button, count).await?;
            if humanize {
                pause(humanizer.click_hold(&self.config), &op.cancel).await?;
            }
            self.release(&op, button, count).await?;

            if humanize && count < click_count {
                pause(humanizer.double_click_interval(&self.config), &op.cancel).await?;
            }
        }
        Ok(())
    }

    /// Left double-click at `target`
    pub async fn double_click(&self, target: Point, humanize: bool) -> Result<(), PointerError> {
        self.click(target, Button::Left, 2, humanize).await
    }

    /// Press the left button at `start`, move to `end`, release
    pub async fn drag(&self, start: Point, end: Point, humanize: bool) -> Result<(), PointerError> {
        self.drag_with_cancel(start, end, humanize, &CancellationToken::new())
            .await
    }

    /// [`drag`](Self::drag) that also stops when `cancel` fires.
    ///
    /// A drag cancelled after the press leaves the button held; no release
    /// is synthesized.
    pub async fn drag_with_cancel(
        &self,
        start: Point,
        end: Point,
        humanize: bool,
        cancel: &CancellationToken,
    ) -> Result<(), PointerError> {
        validate_point(start)?;
        validate_point(end)?;

        let mut humanizer = self.humanizer.lock().await;
        let mut op = self.begin(cancel, true);

        self.travel(&mut humanizer, &mut op, start, humanize).await?;
        self.press(&op, Button::Left, 1).await?;
        if humanize {
            pause(humanizer.drag_start_pause(&self.config), &op.cancel).await?;
        }

        self.travel(&mut humanizer, &mut op, end, humanize).await?;
        if humanize {
            pause(humanizer.drag_end_pause(&self.config), &op.cancel).await?;
        }
        self.release(&op, Button::Left, 1).await
    }

    fn begin(&self, cancel: &CancellationToken, motion: bool) -> OpGuard<'_> {
        OpGuard::begin(&self.tracker, &self.in_flight, cancel.child_token(), motion)
    }

    fn scheduler(&self) -> FrameScheduler<'_> {
        FrameScheduler::new(self.sink.as_ref(), self.hook.as_deref(), &self.config)
    }

    /// One move: a direct jump, or a planned trajectory.
    ///
    /// The reached position is committed whatever the outcome.
    async fn travel(
        &self,
        humanizer: &mut Humanizer,
        op: &mut OpGuard<'_>,
        target: Point,
        humanize: bool,
    ) -> Result<(), PointerError> {
        let scheduler = self.scheduler();

        let result = if humanize {
            let trajectory = Trajectory::plan(op.position, target, &self.config, humanizer.rng());
            scheduler
                .run_trajectory(&trajectory, humanizer, &op.cancel, &mut op.position)
                .await
        } else {
            scheduler.jump(target, &op.cancel, &mut op.position).await
        };

        op.commit();
        result.map(|_| ())
    }

    async fn press(
        &self,
        op: &OpGuard<'_>,
        button: Button,
        click_count: u32,
    ) -> Result<(), PointerError> {
        if op.cancel.is_cancelled() {
            return Err(PointerError::Cancelled);
        }

        self.sink.button_down(button, click_count).await?;
        self.tracker.press(button);

        if let Some(hook) = &self.hook {
            if let Err(e) = hook.on_click(op.position) {
                log::warn!("{}", e);
            }
        }
        Ok(())
    }

    async fn release(
        &self,
        op: &OpGuard<'_>,
        button: Button,
        click_count: u32,
    ) -> Result<(), PointerError> {
        if op.cancel.is_cancelled() {
            return Err(PointerError::Cancelled);
        }

        self.sink.button_up(button, click_count).await?;
        if !self.tracker.release(button) {
            log::debug!("Released {:?} which was not held", button);
        }
        Ok(())
    }
}

fn validate_point(point: Point) -> Result<(), PointerError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(PointerError::InvalidRequest(format!(
            "coordinates must be finite, got ({}, {})",
            point.x, point.y
        )))
    }
}

/// Pointer operation errors
#[derive(Debug, thiserror::Error)]
pub enum PointerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl PointerError {
    /// Check if this is a cooperative cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PointerError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RecordingSink;
    use crate::PointerEvent;

    fn pointer(config: MotionConfig) -> (Arc<RecordingSink>, Pointer) {
        let sink = Arc::new(RecordingSink::new());
        let pointer = Pointer::new(sink.clone(), config)
            .unwrap()
            .with_humanizer(Humanizer::seeded(7));
        (sink, pointer)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = MotionConfig {
            min_duration: 2.0,
            max_duration: 1.0,
            ..Default::default()
        };
        let result = Pointer::new(Arc::new(RecordingSink::new()), config);
        assert!(matches!(result, Err(PointerError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_direct_move() {
        let (sink, pointer) = pointer(MotionConfig::default());

        pointer.move_to(Point::new(100.0, 0.0), false).await.unwrap();

        assert_eq!(sink.events(), vec![PointerEvent::Move { x: 100.0, y: 0.0 }]);
        assert_eq!(pointer.position(), Point::new(100.0, 0.0));
        assert_eq!(pointer.motion_state(), MotionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_humanized_move_lands_on_target() {
        let (sink, pointer) = pointer(MotionConfig::default());
        let target = Point::new(640.0, 360.0);

        pointer.move_to(target, true).await.unwrap();

        let moves = sink.moves();
        assert!(moves.len() > 10);
        assert_eq!(*moves.last().unwrap(), target);
        assert_eq!(pointer.position(), target);
    }

    #[tokio::test]
    async fn test_non_finite_target_rejected() {
        let (sink, pointer) = pointer(MotionConfig::default());

        let result = pointer.move_to(Point::new(f64::NAN, 0.0), true).await;
        assert!(matches!(result, Err(PointerError::InvalidRequest(_))));

        let result = pointer
            .drag(Point::new(0.0, 0.0), Point::new(f64::INFINITY, 1.0), false)
            .await;
        assert!(matches!(result, Err(PointerError::InvalidRequest(_))));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_zero_click_count_rejected() {
        let (sink, pointer) = pointer(MotionConfig::default());

        let result = pointer.click(Point::new(5.0, 5.0), Button::Left, 0, false).await;
        assert!(matches!(result, Err(PointerError::InvalidRequest(_))));
        assert!(sink.is_empty());
        assert_eq!(pointer.position(), Point::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn test_down_up_tracks_buttons() {
        let (sink, pointer) = pointer(MotionConfig::default());

        pointer.down(Button::Right).await.unwrap();
        assert!(pointer.is_pressed(Button::Right));

        pointer.up(Button::Right).await.unwrap();
        assert!(pointer.pressed_buttons().is_empty());
        assert_eq!(sink.presses(), 1);
        assert_eq!(sink.releases(), 1);
    }

    #[tokio::test]
    async fn test_release_without_press_still_emits() {
        let (sink, pointer) = pointer(MotionConfig::default());
        pointer.down(Button::Left).await.unwrap();

        pointer.up(Button::Middle).await.unwrap();

        assert_eq!(
            sink.events().last(),
            Some(&PointerEvent::Up {
                button: Button::Middle,
                click_count: 1
            })
        );
        // State untouched
        assert_eq!(pointer.pressed_buttons(), BTreeSet::from([Button::Left]));
    }

    #[tokio::test]
    async fn test_cancel_with_nothing_running() {
        let (_sink, pointer) = pointer(MotionConfig::default());
        assert!(!pointer.cancel());
    }
}
