use chrono::NaiveDate;
use clap::Args;
use datewidget_core::date::resolve_locale;
use datewidget_core::{Config, DatePresenter, SystemClock};

#[derive(Args)]
pub struct DateArgs {
    /// Render this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    on: Option<NaiveDate>,
    /// Locale for the month name (e.g. "fr_FR"); defaults to date.locale, then the host locale
    #[arg(long)]
    locale: Option<String>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: DateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let locale = resolve_locale(args.locale.as_deref().unwrap_or(&config.date.locale));
    let presenter = DatePresenter::with_clock(SystemClock, locale);

    let date = match args.on {
        Some(day) => presenter.compute_for(day),
        None => presenter.compute_today(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&date)?);
    } else {
        println!("{}", date.date_line());
        println!("{}", date.julian_line());
    }
    Ok(())
}
