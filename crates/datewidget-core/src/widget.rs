//! Home-screen widget view.
//!
//! The widget is render-only: it shows the date, the Julian code and a
//! reminder line. Tapping it produces a [`LaunchIntent`] for the screen.

use serde::{Deserialize, Serialize};

use crate::date::{CalendarDate, Clock, DatePresenter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetView {
    pub date_line: String,
    pub julian_line: String,
    pub reminder: String,
}

/// Where the widget was tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetTap {
    /// Anywhere on the widget body: open the screen.
    Body,
    /// The "start pipette" button: open the screen with the timer running.
    StartButton,
}

/// How the screen should open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchIntent {
    pub start_timer: bool,
    /// Date strings handed over by the launcher. Computed fresh when absent.
    pub date: Option<CalendarDate>,
}

impl LaunchIntent {
    pub fn start_timer() -> Self {
        Self {
            start_timer: true,
            date: None,
        }
    }
}

impl WidgetView {
    pub fn render<C: Clock>(presenter: &DatePresenter<C>, reminder: &str) -> Self {
        let today = presenter.compute_today();
        Self {
            date_line: today.date_line(),
            julian_line: today.julian_line(),
            reminder: reminder.to_string(),
        }
    }

    pub fn lines(&self) -> [&str; 3] {
        [
            self.date_line.as_str(),
            self.julian_line.as_str(),
            self.reminder.as_str(),
        ]
    }

    pub fn tap(&self, target: WidgetTap) -> LaunchIntent {
        match target {
            WidgetTap::Body => LaunchIntent::default(),
            WidgetTap::StartButton => LaunchIntent::start_timer(),
        }
    }
}
