use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "datewidget", version, about = "Date widget and pipette timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print today's date and Julian code
    Date(commands::date::DateArgs),
    /// Render the home-screen widget
    Widget(commands::widget::WidgetArgs),
    /// Open the interactive pipette timer screen
    Screen(commands::screen::ScreenArgs),
    /// Scratch pad management
    Pad {
        #[command(subcommand)]
        action: commands::pad::PadAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DATEWIDGET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Date(args) => commands::date::run(args),
        Commands::Widget(args) => commands::widget::run(args),
        Commands::Screen(args) => commands::screen::run(args),
        Commands::Pad { action } => commands::pad::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
