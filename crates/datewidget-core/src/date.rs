//! Date presenter.
//!
//! Renders a calendar date two ways:
//! - long form, `"October 16, 2026"` (month name follows the host locale
//!   unless a locale is configured)
//! - Julian form, two-digit year followed by the zero-padded day of year,
//!   `"26289"`
//!
//! The presenter reads "today" from an injected [`Clock`] in the host's
//! local calendar. Nothing is cached; every call recomputes.

use chrono::{Datelike, Local, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Locale used when neither the configured nor the host locale is known.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Environment variables naming the host's date locale, highest precedence
/// first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

const LONG_FORM_PATTERN: &str = "%B %-d, %Y";

/// Source of the current local date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Host-local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub long_form: String,
    pub julian: String,
}

impl CalendarDate {
    /// `"Date: <long_form>"`
    pub fn date_line(&self) -> String {
        format!("Date: {}", self.long_form)
    }

    /// `"Julian: <julian>"`
    pub fn julian_line(&self) -> String {
        format!("Julian: {}", self.julian)
    }
}

/// Two-digit year (mod 100) followed by the three-digit day of year.
pub fn julian_code(date: NaiveDate) -> String {
    format!("{:02}{:03}", date.year().rem_euclid(100), date.ordinal())
}

/// Strip codeset and modifier from a POSIX locale value:
/// `"de_DE.UTF-8@euro"` becomes `"de_DE"`. `C` and `POSIX` name no language
/// and yield `None`.
pub fn locale_base(raw: &str) -> Option<&str> {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    match base {
        "" | "C" | "POSIX" => None,
        base => Some(base),
    }
}

/// First non-empty of `LC_ALL`, `LC_TIME`, `LANG` as returned by `lookup`,
/// reduced by [`locale_base`].
pub fn host_locale_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = LOCALE_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.is_empty())?;
    locale_base(&raw).map(str::to_string)
}

/// The host's date locale name from the process environment.
pub fn host_locale() -> Option<String> {
    host_locale_with(|var| std::env::var(var).ok())
}

/// Resolve a configured locale name such as `"fr_FR"`.
///
/// An empty name means the host locale. Anything chrono does not know falls
/// back to `en_US`.
pub fn resolve_locale(name: &str) -> Locale {
    resolve_locale_with(name, host_locale)
}

fn resolve_locale_with<F>(name: &str, host: F) -> Locale
where
    F: FnOnce() -> Option<String>,
{
    let name = name.trim();
    if name.is_empty() {
        return match host() {
            Some(host) => Locale::try_from(host.as_str()).unwrap_or_else(|_| {
                tracing::debug!(locale = %host, fallback = DEFAULT_LOCALE, "host locale not supported");
                Locale::en_US
            }),
            None => Locale::en_US,
        };
    }
    match Locale::try_from(name) {
        Ok(locale) => locale,
        Err(_) => {
            tracing::warn!(locale = name, fallback = DEFAULT_LOCALE, "unknown locale");
            Locale::en_US
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatePresenter<C: Clock = SystemClock> {
    clock: C,
    locale: Locale,
}

impl DatePresenter<SystemClock> {
    /// Presenter on the system clock in the host locale.
    pub fn new() -> Self {
        Self::with_clock(SystemClock, resolve_locale(""))
    }
}

impl Default for DatePresenter<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DatePresenter<C> {
    pub fn with_clock(clock: C, locale: Locale) -> Self {
        Self { clock, locale }
    }

    pub fn compute_today(&self) -> CalendarDate {
        self.compute_for(self.clock.today())
    }

    pub fn compute_for(&self, date: NaiveDate) -> CalendarDate {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));
        CalendarDate {
            long_form: midnight
                .format_localized(LONG_FORM_PATTERN, self.locale)
                .to_string(),
            julian: julian_code(date),
        }
    }
}
