//! Pipette countdown implementation.
//!
//! The countdown is a tick-driven state machine. It owns no schedule of its
//! own - the host delivers one `tick()` per second while the timer runs
//! (see [`TickHandle`](super::TickHandle)).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Idle | Expired)
//! any  -> reset   -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = CountdownTimer::new();
//! timer.start();
//! // Once per second while running:
//! timer.tick(); // Returns Some(Event::TimerExpired) when time runs out
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Default pipette interval: 4 minutes 30 seconds.
pub const DEFAULT_DURATION_MS: u64 = 270_000;

/// Amount removed from the remaining time per tick.
pub const TICK_MS: u64 = 1_000;

/// Threshold of the low-time alert.
pub const ALERT_BEFORE_END_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not started, or paused. Remaining time is frozen.
    Idle,
    Running,
    /// Remaining time reached zero.
    Expired,
}

/// Countdown timer state.
///
/// Every command returns `Some(Event)` when it changed something and `None`
/// when it was a no-op. No command fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    state: TimerState,
    remaining_ms: u64,
    duration_ms: u64,
    /// Low-time alert threshold. `None` keeps the alert inactive.
    #[serde(default)]
    alert_threshold_ms: Option<u64>,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    /// Create an idle timer with the default 4:30 interval.
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION_MS)
    }

    /// Create an idle timer with a custom interval.
    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            state: TimerState::Idle,
            remaining_ms: duration_ms,
            duration_ms,
            alert_threshold_ms: None,
        }
    }

    /// Enable the low-time alert. A zero threshold or one at or above the
    /// full duration can never be crossed and leaves the alert inactive.
    pub fn with_alert_threshold(mut self, threshold_ms: u64) -> Self {
        self.alert_threshold_ms =
            (threshold_ms > 0 && threshold_ms < self.duration_ms).then_some(threshold_ms);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn alert_threshold_ms(&self) -> Option<u64> {
        self.alert_threshold_ms
    }

    /// Remaining time as `m:ss`.
    pub fn display(&self) -> String {
        format_remaining(self.remaining_ms)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            remaining_ms: self.remaining_ms,
            total_ms: self.duration_ms,
            display: self.display(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                tracing::info!(remaining_ms = self.remaining_ms, "countdown started");
                Some(Event::TimerStarted {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            // Already running, or expired and waiting for a reset.
            TimerState::Running | TimerState::Expired => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Idle;
                tracing::debug!(remaining_ms = self.remaining_ms, "countdown paused");
                Some(Event::TimerPaused {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause();
        }
        self.state = TimerState::Idle;
        self.remaining_ms = self.duration_ms;
        tracing::info!(remaining_ms = self.remaining_ms, "countdown reset");
        Some(Event::TimerReset {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Call once per second while running.
    ///
    /// Returns `Some(Event::TimerExpired)` on the tick that reaches zero,
    /// `Some(Event::LowTimeRemaining)` on the tick that crosses an enabled
    /// alert threshold, `Some(Event::TimerTicked)` otherwise, and `None`
    /// when the timer is not running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }

        let before = self.remaining_ms;
        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_MS);

        if self.remaining_ms == 0 {
            self.state = TimerState::Expired;
            tracing::info!("countdown expired");
            return Some(Event::TimerExpired { at: Utc::now() });
        }

        if let Some(threshold_ms) = self.alert_threshold_ms {
            if before > threshold_ms && self.remaining_ms <= threshold_ms {
                tracing::debug!(threshold_ms, "low time threshold crossed");
                return Some(Event::LowTimeRemaining {
                    remaining_ms: self.remaining_ms,
                    threshold_ms,
                    at: Utc::now(),
                });
            }
        }

        Some(Event::TimerTicked {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }
}

/// Format milliseconds as `minutes:seconds`, seconds zero-padded.
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_secs = remaining_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
