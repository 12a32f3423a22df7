mod config;
pub mod prefs;
pub mod scratch_pad;

pub use config::{Config, DateConfig, NotificationsConfig, TimerConfig, WidgetConfig};
pub use prefs::{MemoryPrefs, PrefsStore, SqlitePrefs};
pub use scratch_pad::ScratchPad;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `DATEWIDGET_DATA_DIR` overrides the location entirely. Otherwise the
/// directory is `~/.config/datewidget[-dev]/`, with the `-dev` suffix when
/// `DATEWIDGET_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("DATEWIDGET_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DATEWIDGET_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("datewidget-dev")
            } else {
                base_dir.join("datewidget")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
