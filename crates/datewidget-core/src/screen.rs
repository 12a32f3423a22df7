//! The timer screen: the host that owns the countdown.
//!
//! A [`Screen`] owns one [`CountdownTimer`], at most one [`TickHandle`], the
//! scratch pad and the injected surface, notifier and preference store.
//! All mutation happens through `&mut Screen` on the host's single task.
//!
//! The tick handle exists exactly while the countdown is running. Pause,
//! reset, expiry and close all drop it, so a cancelled schedule cannot
//! deliver another tick.
//!
//! ## Host loop
//!
//! ```ignore
//! let mut screen = Screen::open(deps, &presenter, config.countdown(), intent)?;
//! loop {
//!     tokio::select! {
//!         _ = screen.next_tick() => { screen.on_tick(); }
//!         line = input.next_line() => { /* start / pause / reset / edit */ }
//!     }
//! }
//! screen.close();
//! ```

use crate::date::{CalendarDate, Clock, DatePresenter};
use crate::error::StorageError;
use crate::events::Event;
use crate::notify::{self, Alert, Notifier};
use crate::storage::{PrefsStore, ScratchPad};
use crate::timer::{CountdownTimer, TickHandle, TICK_PERIOD};
use crate::widget::LaunchIntent;

pub const START_LABEL: &str = "Start";
pub const PAUSE_LABEL: &str = "Pause";

/// Rendering target of the screen.
pub trait Surface {
    fn show_date(&mut self, date: &CalendarDate);
    /// `"Pipette Timer: <m:ss>"`
    fn show_timer(&mut self, line: &str);
    /// Start/pause button label.
    fn show_button(&mut self, label: &str);
    fn show_scratch_pad(&mut self, text: &str);
}

/// Injected collaborators of a [`Screen`].
pub struct ScreenDeps<S, N, P> {
    pub surface: S,
    pub notifier: N,
    pub prefs: P,
}

impl<S, N, P> ScreenDeps<S, N, P> {
    pub fn new(surface: S, notifier: N, prefs: P) -> Self {
        Self {
            surface,
            notifier,
            prefs,
        }
    }
}

pub struct Screen<S: Surface, N: Notifier, P: PrefsStore> {
    surface: S,
    notifier: N,
    pad: ScratchPad<P>,
    timer: CountdownTimer,
    ticker: Option<TickHandle>,
    alerts_shown: usize,
}

impl<S: Surface, N: Notifier, P: PrefsStore> Screen<S, N, P> {
    /// Open the screen: render the date, the timer and the saved scratch pad
    /// text, then start the countdown if the launch asked for it.
    ///
    /// Starting the countdown needs a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the scratch pad cannot be loaded.
    pub fn open<C: Clock>(
        deps: ScreenDeps<S, N, P>,
        presenter: &DatePresenter<C>,
        timer: CountdownTimer,
        intent: LaunchIntent,
    ) -> Result<Self, StorageError> {
        let ScreenDeps {
            mut surface,
            notifier,
            prefs,
        } = deps;

        let date = intent.date.unwrap_or_else(|| presenter.compute_today());
        surface.show_date(&date);

        let pad = ScratchPad::load(prefs)?;
        surface.show_scratch_pad(pad.text());

        let mut screen = Self {
            surface,
            notifier,
            pad,
            timer,
            ticker: None,
            alerts_shown: 0,
        };
        screen.render_timer();

        if intent.start_timer {
            screen.start();
        }
        Ok(screen)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn scratch_pad(&self) -> &str {
        self.pad.text()
    }

    /// Whether a tick schedule is live.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn alerts_shown(&self) -> usize {
        self.alerts_shown
    }

    pub fn timer_line(&self) -> String {
        format!("Pipette Timer: {}", self.timer.display())
    }

    // ── User actions ─────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.timer.start()?;
        self.ticker = Some(TickHandle::schedule(TICK_PERIOD));
        self.render_timer();
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.cancel_ticker();
        let event = self.timer.pause();
        self.render_timer();
        event
    }

    /// The start/pause button.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_ticker();
        let event = self.timer.reset();
        self.render_timer();
        event
    }

    /// Replace the scratch pad text and persist it.
    ///
    /// A failed write is logged and returned; the screen keeps the new text.
    pub fn edit_scratch_pad(&mut self, text: impl Into<String>) -> Result<(), StorageError> {
        let result = self.pad.edit(text);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "failed to save scratch pad");
        }
        self.surface.show_scratch_pad(self.pad.text());
        result
    }

    // ── Scheduling ───────────────────────────────────────────────────

    /// Wait for the next tick. Never resolves while no schedule is live.
    pub async fn next_tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => ticker.tick().await,
            None => std::future::pending().await,
        }
    }

    /// Apply one tick delivered by [`Screen::next_tick`].
    pub fn on_tick(&mut self) -> Option<Event> {
        if self.ticker.is_none() {
            return None;
        }
        let event = self.timer.tick()?;
        match &event {
            Event::TimerExpired { .. } => self.cancel_ticker(),
            Event::LowTimeRemaining { threshold_ms, .. } => {
                if notify::deliver(&mut self.notifier, &Alert::low_time(*threshold_ms)) {
                    self.alerts_shown += 1;
                }
            }
            _ => {}
        }
        self.render_timer();
        Some(event)
    }

    /// Close the screen, cancelling any live schedule. Returns the
    /// preference store so the screen can be reopened on it.
    pub fn close(mut self) -> P {
        self.cancel_ticker();
        tracing::debug!(remaining_ms = self.timer.remaining_ms(), "screen closed");
        self.pad.into_prefs()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn render_timer(&mut self) {
        let line = self.timer_line();
        self.surface.show_timer(&line);
        self.surface.show_button(if self.timer.is_running() {
            PAUSE_LABEL
        } else {
            START_LABEL
        });
    }
}

/// Surface that keeps what it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub date_line: String,
    pub julian_line: String,
    pub timer_lines: Vec<String>,
    pub button: String,
    pub scratch_pad: String,
}

impl RecordingSurface {
    pub fn last_timer_line(&self) -> Option<&str> {
        self.timer_lines.last().map(String::as_str)
    }
}

impl Surface for RecordingSurface {
    fn show_date(&mut self, date: &CalendarDate) {
        self.date_line = date.date_line();
        self.julian_line = date.julian_line();
    }

    fn show_timer(&mut self, line: &str) {
        self.timer_lines.push(line.to_string());
    }

    fn show_button(&mut self, label: &str) {
        self.button = label.to_string();
    }

    fn show_scratch_pad(&mut self, text: &str) {
        self.scratch_pad = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::FixedClock;
    use crate::notify::{Permission, RecordingNotifier};
    use crate::storage::MemoryPrefs;
    use crate::timer::TimerState;
    use chrono::{Locale, NaiveDate};

    type TestScreen = Screen<RecordingSurface, RecordingNotifier, MemoryPrefs>;

    fn presenter() -> DatePresenter<FixedClock> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DatePresenter::with_clock(FixedClock(day), Locale::en_US)
    }

    fn open(intent: LaunchIntent) -> TestScreen {
        let deps = ScreenDeps::new(
            RecordingSurface::default(),
            RecordingNotifier::new(Permission::Granted),
            MemoryPrefs::new(),
        );
        Screen::open(deps, &presenter(), CountdownTimer::new(), intent).unwrap()
    }

    #[test]
    fn open_renders_date_and_idle_timer() {
        let screen = open(LaunchIntent::default());
        let surface = screen.surface();
        assert_eq!(surface.date_line, "Date: January 1, 2024");
        assert_eq!(surface.julian_line, "Julian: 24001");
        assert_eq!(surface.last_timer_line(), Some("Pipette Timer: 4:30"));
        assert_eq!(surface.button, START_LABEL);
        assert!(!screen.is_ticking());
    }

    #[test]
    fn launch_date_overrides_presenter() {
        let handed_over = CalendarDate {
            long_form: "May 4, 2025".into(),
            julian: "25124".into(),
        };
        let screen = open(LaunchIntent {
            start_timer: false,
            date: Some(handed_over),
        });
        assert_eq!(screen.surface().julian_line, "Julian: 25124");
    }

    #[test]
    fn tick_without_schedule_is_ignored() {
        let mut screen = open(LaunchIntent::default());
        assert!(screen.on_tick().is_none());
        assert_eq!(screen.timer().remaining_ms(), 270_000);
    }

    #[tokio::test(start_paused = true)]
    async fn start_intent_schedules_ticks() {
        let mut screen = open(LaunchIntent::start_timer());
        assert!(screen.is_ticking());
        assert_eq!(screen.surface().button, PAUSE_LABEL);

        screen.next_tick().await;
        screen.on_tick();
        assert_eq!(screen.surface().last_timer_line(), Some("Pipette Timer: 4:29"));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_and_reset_cancel_the_schedule() {
        let mut screen = open(LaunchIntent::default());
        screen.toggle();
        assert!(screen.is_ticking());

        screen.toggle();
        assert!(!screen.is_ticking());
        assert_eq!(screen.timer().state(), TimerState::Idle);

        screen.start();
        screen.next_tick().await;
        screen.on_tick();
        screen.reset();
        assert!(!screen.is_ticking());
        assert_eq!(screen.timer().remaining_ms(), 270_000);
        assert_eq!(screen.surface().last_timer_line(), Some("Pipette Timer: 4:30"));
    }

    #[test]
    fn scratch_pad_edit_is_rendered() {
        let mut screen = open(LaunchIntent::default());
        screen.edit_scratch_pad("buffer A").unwrap();
        assert_eq!(screen.surface().scratch_pad, "buffer A");
        assert_eq!(screen.scratch_pad(), "buffer A");
    }
}
