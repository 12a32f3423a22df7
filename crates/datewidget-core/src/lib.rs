//! # Date Widget Core Library
//!
//! This library provides the logic behind the date widget and its pipette
//! timer screen. Hosts (the CLI today) render what the core produces and
//! forward user actions back into it.
//!
//! ## Architecture
//!
//! - **Date Presenter**: today's date as a long form and as a two-digit-year
//!   plus day-of-year "Julian" code
//! - **Countdown Timer**: a tick-driven 4:30 state machine; the host delivers
//!   ticks from an owned, cancellable [`TickHandle`]
//! - **Screen**: the host-side owner of the countdown, its schedule, the
//!   scratch pad and the injected surface/notifier/preference store
//! - **Storage**: SQLite-backed namespaced preferences and TOML configuration
//!
//! ## Key Components
//!
//! - [`DatePresenter`]: date formatting
//! - [`CountdownTimer`]: countdown state machine
//! - [`Screen`]: timer screen host
//! - [`WidgetView`]: home-screen widget view
//! - [`Config`]: application configuration management

pub mod date;
pub mod error;
pub mod events;
pub mod notify;
pub mod screen;
pub mod storage;
pub mod timer;
pub mod widget;

pub use date::{CalendarDate, Clock, DatePresenter, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use notify::{Alert, Notifier, Permission, RecordingNotifier};
pub use screen::{RecordingSurface, Screen, ScreenDeps, Surface};
pub use storage::{Config, MemoryPrefs, PrefsStore, ScratchPad, SqlitePrefs};
pub use timer::{format_remaining, CountdownTimer, TickHandle, TimerState};
pub use widget::{LaunchIntent, WidgetTap, WidgetView};
