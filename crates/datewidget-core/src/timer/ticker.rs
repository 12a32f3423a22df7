//! Cancellable one-second schedule for the countdown.
//!
//! A [`TickHandle`] is owned by exactly one host. Ticks can only be awaited
//! through `&mut TickHandle`, and [`TickHandle::cancel`] consumes the handle,
//! so once cancellation returns there is nothing left to deliver a tick.
//! Dropping the handle cancels it as well.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct TickHandle {
    interval: Interval,
    delivered: u64,
}

impl TickHandle {
    /// Schedule a repeating tick. The first tick fires one full period after
    /// scheduling.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(period: Duration) -> Self {
        let mut interval = time::interval_at(Instant::now() + period, period);
        // A host that was busy should not receive a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(period_ms = period.as_millis() as u64, "tick scheduled");
        Self {
            interval,
            delivered: 0,
        }
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
        self.delivered += 1;
    }

    /// Number of ticks delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Cancel the schedule.
    pub fn cancel(self) {
        tracing::debug!(delivered = self.delivered, "tick cancelled");
    }
}
