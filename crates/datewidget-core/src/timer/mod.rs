mod countdown;
mod ticker;

pub use countdown::{
    format_remaining, CountdownTimer, TimerState, ALERT_BEFORE_END_MS, DEFAULT_DURATION_MS,
    TICK_MS,
};
pub use ticker::{TickHandle, TICK_PERIOD};
