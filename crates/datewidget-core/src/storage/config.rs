//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Pipette timer duration
//! - Low-time alert settings (inactive by default)
//! - Date locale
//! - Widget reminder text
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::timer::{CountdownTimer, ALERT_BEFORE_END_MS, DEFAULT_DURATION_MS};

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Raise an alert when the countdown crosses `alert_threshold_secs`.
    #[serde(default)]
    pub low_time_alert: bool,
    #[serde(default = "default_alert_threshold_secs")]
    pub alert_threshold_secs: u64,
}

/// Date presenter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// Chrono locale name such as `"fr_FR"`; empty follows the host locale.
    #[serde(default = "default_locale")]
    pub locale: String,
}

/// Home-screen widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_reminder")]
    pub reminder: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub date: DateConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
}

// Default functions
fn default_duration_secs() -> u64 {
    DEFAULT_DURATION_MS / 1000
}
fn default_true() -> bool {
    true
}
fn default_alert_threshold_secs() -> u64 {
    ALERT_BEFORE_END_MS / 1000
}
fn default_locale() -> String {
    String::new()
}
fn default_reminder() -> String {
    "Don't forget to SAP".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            low_time_alert: false,
            alert_threshold_secs: default_alert_threshold_secs(),
        }
    }
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            reminder: default_reminder(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(format!("'{value}': {e}")))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|e| invalid(format!("'{value}': {e}")))?
                    .into(),
            ),
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                return Err(invalid("cannot replace a whole section".into()));
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value has the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// A fresh countdown built from the timer and alert settings.
    ///
    /// The alert threshold is only applied when both notifications and the
    /// low-time alert are enabled.
    pub fn countdown(&self) -> CountdownTimer {
        let timer = CountdownTimer::with_duration(self.timer.duration_secs.saturating_mul(1000));
        if self.notifications.enabled && self.notifications.low_time_alert {
            timer.with_alert_threshold(self.notifications.alert_threshold_secs.saturating_mul(1000))
        } else {
            timer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.duration_secs, 270);
        assert!(!parsed.notifications.low_time_alert);
        assert_eq!(parsed.date.locale, "");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[notifications]\nlow_time_alert = true\n").unwrap();
        assert!(parsed.notifications.low_time_alert);
        assert!(parsed.notifications.enabled);
        assert_eq!(parsed.notifications.alert_threshold_secs, 30);
        assert_eq!(parsed.widget.reminder, "Don't forget to SAP");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.duration_secs").as_deref(), Some("270"));
        assert_eq!(cfg.get("date.locale").as_deref(), Some(""));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_each_value_type() {
        let mut cfg = Config::default();
        cfg.set("notifications.low_time_alert", "true").unwrap();
        cfg.set("timer.duration_secs", "90").unwrap();
        cfg.set("date.locale", "fr_FR").unwrap();
        assert!(cfg.notifications.low_time_alert);
        assert_eq!(cfg.timer.duration_secs, 90);
        assert_eq!(cfg.date.locale, "fr_FR");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent", "1"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.set("nope", "1").is_err());
    }

    #[test]
    fn tick_period_is_not_configurable() {
        let mut cfg = Config::default();
        assert!(cfg.get("timer.tick_interval_ms").is_none());
        assert!(matches!(
            cfg.set("timer.tick_interval_ms", "500"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));

        // Older files that still carry the key load and ignore it.
        let parsed: Config =
            toml::from_str("[timer]\nduration_secs = 270\ntick_interval_ms = 500\n").unwrap();
        assert_eq!(parsed.timer.duration_secs, 270);
        assert!(!toml::to_string_pretty(&parsed).unwrap().contains("tick_interval_ms"));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("notifications.enabled", "not_a_bool"),
            Err(CoreError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(cfg.set("timer.duration_secs", "-5").is_err());
        assert!(cfg.set("timer", "{}").is_err());
    }

    #[test]
    fn countdown_ignores_alert_unless_enabled() {
        let mut cfg = Config::default();
        assert!(cfg.countdown().alert_threshold_ms().is_none());

        cfg.notifications.low_time_alert = true;
        assert_eq!(cfg.countdown().alert_threshold_ms(), Some(30_000));

        cfg.notifications.enabled = false;
        assert!(cfg.countdown().alert_threshold_ms().is_none());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timer.duration_secs, 270);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }
}
