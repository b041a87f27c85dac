// SPDX-License-Identifier: MPL-2.0
//! Cancellable periodic task.
//!
//! A [`Ticker`] runs a callback on a Tokio interval until the callback
//! asks to stop or the ticker is cancelled. Dropping the ticker aborts the
//! task, so an owner that goes away never leaves an orphaned interval behind.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Handle to a running periodic task.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a task calling `on_tick` every `period`, first after one period.
    ///
    /// The task ends when `on_tick` returns `false`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stops the task. No further callbacks run after this returns.
    pub fn cancel(self) {
        drop(self);
    }

    /// Returns true once the task has ended on its own or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
