use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every countdown state change produces an Event.
/// The screen renders from them; the CLI can print them as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The tick that crossed the configured low-time threshold.
    /// Only produced when the alert is enabled.
    LowTimeRemaining {
        remaining_ms: u64,
        threshold_ms: u64,
        at: DateTime<Utc>,
    },
    TimerExpired {
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        remaining_ms: u64,
        total_ms: u64,
        display: String,
        at: DateTime<Utc>,
    },
}
