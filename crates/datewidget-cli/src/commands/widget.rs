use clap::{Args, ValueEnum};
use datewidget_core::date::resolve_locale;
use datewidget_core::{Config, DatePresenter, SystemClock, WidgetTap, WidgetView};

#[derive(Clone, Copy, ValueEnum)]
enum Tap {
    /// Open the timer screen
    Body,
    /// Open the timer screen with the countdown running
    Start,
}

#[derive(Args)]
pub struct WidgetArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
    /// Tap the widget after rendering it
    #[arg(long, value_enum)]
    tap: Option<Tap>,
}

pub fn run(args: WidgetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let presenter = DatePresenter::with_clock(SystemClock, resolve_locale(&config.date.locale));
    let view = WidgetView::render(&presenter, &config.widget.reminder);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in view.lines() {
            println!("{line}");
        }
    }

    let Some(tap) = args.tap else {
        return Ok(());
    };
    let intent = view.tap(match tap {
        Tap::Body => WidgetTap::Body,
        Tap::Start => WidgetTap::StartButton,
    });
    super::screen::open_screen(&config, intent)
}
