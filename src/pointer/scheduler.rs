//! Frame scheduling
//!
//! Paces planned frames through the event sink against wall-clock
//! deadlines, adding tremor to every frame but the last and stopping as soon
//! as cancellation is observed.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use super::PointerError;
use crate::config::MotionConfig;
use crate::input::{DebugHook, EventSink};
use crate::motion::{tremor, MotionPlan, Trajectory};
use crate::stealth::Humanizer;
use crate::Point;

/// Emits frames to a sink at the configured cadence
pub struct FrameScheduler<'a> {
    sink: &'a dyn EventSink,
    hook: Option<&'a dyn DebugHook>,
    config: &'a MotionConfig,
}

/// Deadline bookkeeping shared across the plans of one trajectory
#[derive(Debug, Default)]
struct Pacer {
    deadline: Option<Instant>,
}

impl Pacer {
    /// Wait for the next frame slot. The first slot is immediate.
    async fn tick(
        &mut self,
        humanizer: &mut Humanizer,
        config: &MotionConfig,
        cancel: &CancellationToken,
    ) -> Result<(), PointerError> {
        match self.deadline {
            None => self.deadline = Some(Instant::now()),
            Some(previous) => {
                let mut next = previous + humanizer.frame_delay(config);
                if let Some(hesitation) = humanizer.micro_pause(config) {
                    next += hesitation;
                }
                self.deadline = Some(next);
                wait_until(next, cancel).await?;
            }
        }

        if cancel.is_cancelled() {
            return Err(PointerError::Cancelled);
        }
        Ok(())
    }
}

impl<'a> FrameScheduler<'a> {
    /// Create a scheduler over a sink and optional debug hook
    pub fn new(
        sink: &'a dyn EventSink,
        hook: Option<&'a dyn DebugHook>,
        config: &'a MotionConfig,
    ) -> Self {
        Self { sink, hook, config }
    }

    /// Run every plan of a trajectory back to back.
    ///
    /// `last` tracks the most recent acknowledged frame, so it is accurate
    /// even when this returns an error.
    pub async fn run_trajectory(
        &self,
        trajectory: &Trajectory,
        humanizer: &mut Humanizer,
        cancel: &CancellationToken,
        last: &mut Point,
    ) -> Result<Point, PointerError> {
        let mut pacer = Pacer::default();
        for plan in &trajectory.plans {
            self.run_plan(plan, humanizer, cancel, &mut pacer, last).await?;
        }
        Ok(*last)
    }

    /// Run a single plan
    pub async fn run(
        &self,
        plan: &MotionPlan,
        humanizer: &mut Humanizer,
        cancel: &CancellationToken,
        last: &mut Point,
    ) -> Result<Point, PointerError> {
        let mut pacer = Pacer::default();
        self.run_plan(plan, humanizer, cancel, &mut pacer, last).await?;
        Ok(*last)
    }

    /// Emit a single unpaced frame at `target`
    pub async fn jump(
        &self,
        target: Point,
        cancel: &CancellationToken,
        last: &mut Point,
    ) -> Result<Point, PointerError> {
        if cancel.is_cancelled() {
            return Err(PointerError::Cancelled);
        }
        self.emit(target, last).await?;
        Ok(target)
    }

    async fn run_plan(
        &self,
        plan: &MotionPlan,
        humanizer: &mut Humanizer,
        cancel: &CancellationToken,
        pacer: &mut Pacer,
        last: &mut Point,
    ) -> Result<(), PointerError> {
        for index in 1..=plan.frame_count {
            if let Err(e) = pacer.tick(humanizer, self.config, cancel).await {
                log::info!(
                    "Motion cancelled after frame {} of {}",
                    index - 1,
                    plan.frame_count
                );
                return Err(e);
            }

            // The terminal frame lands exactly on the endpoint
            let position = if index == plan.frame_count {
                plan.end
            } else {
                let frame = plan.frame(index);
                tremor::perturb(
                    frame.position,
                    plan.normalized_speed(index),
                    self.config,
                    humanizer.rng(),
                )
            };

            self.emit(position, last).await?;
        }
        Ok(())
    }

    async fn emit(&self, point: Point, last: &mut Point) -> Result<(), PointerError> {
        self.sink.move_to(point.x, point.y).await?;
        *last = point;
        log::trace!("move ({:.2}, {:.2})", point.x, point.y);

        if let Some(hook) = self.hook {
            if let Err(e) = hook.on_frame(point) {
                log::warn!("{}", e);
            }
        }
        Ok(())
    }
}

/// Cancellable sleep used for the human pauses between actions
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<(), PointerError> {
    if duration.is_zero() {
        return if cancel.is_cancelled() {
            Err(PointerError::Cancelled)
        } else {
            Ok(())
        };
    }
    wait_until(Instant::now() + duration, cancel).await
}

async fn wait_until(deadline: Instant, cancel: &CancellationToken) -> Result<(), PointerError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PointerError::Cancelled),
        _ = sleep_until(deadline) => Ok(()),
    }
}
