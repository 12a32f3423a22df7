use clap::Subcommand;
use datewidget_core::{ScratchPad, SqlitePrefs};

#[derive(Subcommand)]
pub enum PadAction {
    /// Print the saved scratch pad text
    Show,
    /// Replace the scratch pad text
    Set {
        /// New text
        text: String,
    },
    /// Clear the scratch pad
    Clear,
}

pub fn run(action: PadAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut pad = ScratchPad::load(SqlitePrefs::open()?)?;

    match action {
        PadAction::Show => println!("{}", pad.text()),
        PadAction::Set { text } => {
            pad.edit(text)?;
            println!("ok");
        }
        PadAction::Clear => {
            pad.clear()?;
            println!("scratch pad cleared");
        }
    }
    Ok(())
}
