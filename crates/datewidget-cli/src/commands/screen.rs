use std::io::Write;

use clap::Args;
use datewidget_core::date::resolve_locale;
use datewidget_core::notify::{Alert, Notifier, Permission};
use datewidget_core::screen::{Screen, ScreenDeps, Surface};
use datewidget_core::{CalendarDate, Config, DatePresenter, LaunchIntent, SqlitePrefs, SystemClock};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "commands: <enter>|toggle, start, pause, reset, pad [text], status, quit";

#[derive(Args)]
pub struct ScreenArgs {
    /// Start the countdown as soon as the screen opens
    #[arg(long)]
    start: bool,
}

/// Prints everything the screen shows to stdout.
struct TerminalSurface {
    button: Option<String>,
}

impl Surface for TerminalSurface {
    fn show_date(&mut self, date: &CalendarDate) {
        println!("{}", date.date_line());
        println!("{}", date.julian_line());
    }

    fn show_timer(&mut self, line: &str) {
        println!("{line}");
    }

    fn show_button(&mut self, label: &str) {
        if self.button.as_deref() != Some(label) {
            println!("[{label}]");
            self.button = Some(label.to_string());
        }
    }

    fn show_scratch_pad(&mut self, text: &str) {
        println!("Scratch pad: {text}");
    }
}

/// Rings the terminal bell and prints the alert to stderr.
struct TerminalNotifier {
    permission: Permission,
}

impl Notifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn show(&mut self, alert: &Alert) {
        eprintln!("\x07{}: {}", alert.title, alert.body);
    }
}

enum Command {
    Toggle,
    Start,
    Pause,
    Reset,
    Status,
    ShowPad,
    EditPad(String),
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (line.trim(), None),
    };
    match (word, rest) {
        ("" | "toggle" | "t", None) => Command::Toggle,
        ("start" | "s", None) => Command::Start,
        ("pause" | "p", None) => Command::Pause,
        ("reset" | "r", None) => Command::Reset,
        ("status", None) => Command::Status,
        ("pad", None) => Command::ShowPad,
        ("pad", Some(text)) if text.trim().is_empty() => Command::ShowPad,
        ("pad", Some(text)) => Command::EditPad(text.to_string()),
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

pub fn run(args: ScreenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let intent = if args.start {
        LaunchIntent::start_timer()
    } else {
        LaunchIntent::default()
    };
    open_screen(&config, intent)
}

/// Open the screen and run its host loop until the user quits or stdin
/// closes.
pub fn open_screen(config: &Config, intent: LaunchIntent) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(host_loop(config, intent))
}

async fn host_loop(config: &Config, intent: LaunchIntent) -> Result<(), Box<dyn std::error::Error>> {
    let presenter = DatePresenter::with_clock(SystemClock, resolve_locale(&config.date.locale));
    let permission = if config.notifications.enabled {
        Permission::Granted
    } else {
        Permission::Denied
    };
    let deps = ScreenDeps::new(
        TerminalSurface { button: None },
        TerminalNotifier { permission },
        SqlitePrefs::open()?,
    );

    let mut screen = Screen::open(deps, &presenter, config.countdown(), intent)?;
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = screen.next_tick() => {
                screen.on_tick();
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Command::Toggle => {
                        screen.toggle();
                    }
                    Command::Start => {
                        screen.start();
                    }
                    Command::Pause => {
                        screen.pause();
                    }
                    Command::Reset => {
                        screen.reset();
                    }
                    Command::Status => {
                        println!("{}", serde_json::to_string(&screen.timer().snapshot())?);
                    }
                    Command::ShowPad => println!("Scratch pad: {}", screen.scratch_pad()),
                    Command::EditPad(text) => {
                        if let Err(e) = screen.edit_scratch_pad(text) {
                            eprintln!("scratch pad not saved: {e}");
                        }
                    }
                    Command::Quit => break,
                    Command::Unknown(other) => eprintln!("unknown command: {other}\n{HELP}"),
                }
            }
        }
        std::io::stdout().flush()?;
    }

    tracing::debug!(remaining = %screen.timer().display(), "closing screen");
    screen.close();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_toggles() {
        assert!(matches!(parse_command(""), Command::Toggle));
        assert!(matches!(parse_command("toggle\r\n"), Command::Toggle));
    }

    #[test]
    fn pad_with_text_edits() {
        match parse_command("pad buffer A") {
            Command::EditPad(text) => assert_eq!(text, "buffer A"),
            _ => panic!("expected EditPad"),
        }
        assert!(matches!(parse_command("pad"), Command::ShowPad));
    }

    #[test]
    fn pad_with_only_whitespace_shows() {
        assert!(matches!(parse_command("pad "), Command::ShowPad));
        assert!(matches!(parse_command("pad   \r\n"), Command::ShowPad));
        match parse_command("pad  indented") {
            Command::EditPad(text) => assert_eq!(text, " indented"),
            _ => panic!("expected EditPad"),
        }
    }

    #[test]
    fn unknown_words_are_reported() {
        assert!(matches!(parse_command("launch"), Command::Unknown(_)));
        assert!(matches!(parse_command("start now"), Command::Unknown(_)));
        assert!(matches!(parse_command("q"), Command::Quit));
    }
}
