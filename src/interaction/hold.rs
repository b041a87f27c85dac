// SPDX-License-Identifier: MPL-2.0
//! Press-and-sustain gesture state machine.
//!
//! The gesture accumulates progress while held and completes once progress
//! reaches [`HOLD_PROGRESS_MAX`]:
//! - Idle: not pressed, progress 0
//! - Holding: pressed, progress grows by one step per tick
//! - Completed: terminal, the celebration has fired
//!
//! Ticks come either from the host calling [`HoldGesture::tick`] directly
//! or from a [`Ticker`] the gesture owns when built with a [`TickSchedule`].
//! Scheduled ticks carry a generation number so ticks queued before a
//! release are discarded instead of mutating the abandoned gesture.

use super::ticker::Ticker;
use crate::celebration::Celebration;
use crate::config::{
    DEFAULT_HOLD_STEP, DEFAULT_HOLD_TICK_MS, HOLD_PROGRESS_MAX, MAX_HOLD_STEP, MAX_HOLD_TICK_MS,
    MIN_HOLD_STEP, MIN_HOLD_TICK_MS,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Period between hold gesture ticks in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (5–500 ms).
///
/// # Example
///
/// ```
/// use storydeck::interaction::HoldTick;
///
/// let tick = HoldTick::new(30);
/// assert_eq!(tick.value(), 30);
///
/// // Values outside range are clamped
/// let too_slow = HoldTick::new(10_000);
/// assert_eq!(too_slow.value(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTick(u64);

impl HoldTick {
    /// Creates a new tick period, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_HOLD_TICK_MS, MAX_HOLD_TICK_MS))
    }

    /// Returns the period in milliseconds.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the period as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for HoldTick {
    fn default() -> Self {
        Self(DEFAULT_HOLD_TICK_MS)
    }
}

/// Progress units added per tick, clamped to 1–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldStep(u8);

impl HoldStep {
    #[must_use]
    pub fn new(units: u8) -> Self {
        Self(units.clamp(MIN_HOLD_STEP, MAX_HOLD_STEP))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for HoldStep {
    fn default() -> Self {
        Self(DEFAULT_HOLD_STEP)
    }
}

/// Lifecycle of a hold gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldStatus {
    #[default]
    Idle,
    Holding,
    /// Terminal.
    Completed,
}

impl HoldStatus {
    #[must_use]
    pub fn is_holding(self) -> bool {
        matches!(self, Self::Holding)
    }

    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Callback used by scheduled ticks to reach the gesture's owner.
///
/// Receives the tick generation; returns `false` once the owner is gone.
pub type TickSink = Arc<dyn Fn(u64) -> bool + Send + Sync>;

/// How a gesture drives its own ticks.
#[derive(Clone)]
pub struct TickSchedule {
    period: HoldTick,
    sink: TickSink,
}

impl TickSchedule {
    pub fn new(period: HoldTick, sink: TickSink) -> Self {
        Self { period, sink }
    }

    pub fn period(&self) -> HoldTick {
        self.period
    }
}

impl fmt::Debug for TickSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickSchedule")
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

/// Press-and-sustain gesture controller.
#[derive(Debug)]
pub struct HoldGesture {
    progress: u8,
    status: HoldStatus,
    step: HoldStep,
    schedule: Option<TickSchedule>,
    /// At most one live timer; dropping it aborts the task.
    ticker: Option<Ticker>,
    /// Bumped on every start, stop and completion.
    generation: u64,
}

impl HoldGesture {
    /// Creates a gesture ticked by the host through [`HoldGesture::tick`].
    pub fn manual(step: HoldStep) -> Self {
        Self {
            progress: 0,
            status: HoldStatus::Idle,
            step,
            schedule: None,
            ticker: None,
            generation: 0,
        }
    }

    /// Creates a gesture that spawns its own ticker while held.
    ///
    /// Each scheduled tick calls the sink with the current generation; the
    /// owner feeds it back through [`HoldGesture::on_tick`].
    pub fn scheduled(step: HoldStep, schedule: TickSchedule) -> Self {
        Self {
            schedule: Some(schedule),
            ..Self::manual(step)
        }
    }

    /// Starts generation numbering at `generation`.
    ///
    /// Owners that replace a gesture pass a value above the old gesture's
    /// last generation so ticks it already queued never match the new one.
    #[must_use]
    pub fn starting_at(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn status(&self) -> HoldStatus {
        self.status
    }

    /// Returns the generation scheduled ticks are currently stamped with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true while a ticker task is owned by this gesture.
    pub fn has_live_timer(&self) -> bool {
        self.ticker.is_some()
    }

    /// Begins holding. Only valid from idle; returns whether state changed.
    ///
    /// # Panics
    ///
    /// A scheduled gesture panics if started outside a Tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.status != HoldStatus::Idle {
            return false;
        }
        self.status = HoldStatus::Holding;
        self.generation += 1;

        if let Some(schedule) = &self.schedule {
            let sink = Arc::clone(&schedule.sink);
            let generation = self.generation;
            self.ticker = Some(Ticker::spawn(schedule.period.as_duration(), move || {
                sink(generation)
            }));
        }
        log::debug!("hold gesture started");
        true
    }

    /// Releases the gesture before completion, resetting progress.
    ///
    /// No-op when idle or completed; returns whether state changed.
    pub fn stop(&mut self) -> bool {
        if self.status != HoldStatus::Holding {
            return false;
        }
        self.cancel_timer();
        self.status = HoldStatus::Idle;
        self.progress = 0;
        log::debug!("hold gesture released");
        true
    }

    /// Applies one scheduled tick if it belongs to the current hold.
    pub fn on_tick(&mut self, generation: u64) -> Option<Celebration> {
        if generation != self.generation {
            log::debug!(
                "discarding stale hold tick (generation {} != {})",
                generation,
                self.generation
            );
            return None;
        }
        self.tick()
    }

    /// Advances progress by one step while holding.
    ///
    /// Returns the celebration exactly once, on the tick that completes
    /// the gesture.
    pub fn tick(&mut self) -> Option<Celebration> {
        if self.status != HoldStatus::Holding {
            return None;
        }
        self.progress = self
            .progress
            .saturating_add(self.step.value())
            .min(HOLD_PROGRESS_MAX);

        if self.progress < HOLD_PROGRESS_MAX {
            return None;
        }
        self.cancel_timer();
        self.status = HoldStatus::Completed;
        log::info!("hold gesture completed");
        Some(Celebration::hold_complete())
    }

    fn cancel_timer(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.generation += 1;
    }
}
