//! Best-effort alert delivery.
//!
//! Alerts go through a host-provided [`Notifier`]. When the host has no
//! permission to show notifications the alert is dropped; this never
//! reaches the countdown.

use serde::{Deserialize, Serialize};

pub const CHANNEL_ID: &str = "PipetteTimerChannel";
pub const NOTIFICATION_ID: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
}

/// A one-shot alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub channel_id: String,
    pub notification_id: u32,
    pub title: String,
    pub body: String,
}

impl Alert {
    /// The pipette timer's low-time alert.
    pub fn low_time(threshold_ms: u64) -> Self {
        Self {
            channel_id: CHANNEL_ID.into(),
            notification_id: NOTIFICATION_ID,
            title: "Pipette Timer Alert".into(),
            body: format!("{} seconds remaining!", threshold_ms / 1000),
        }
    }
}

/// Host notification mechanism.
pub trait Notifier {
    fn permission(&self) -> Permission;

    /// Display the alert. Only called when permission is granted.
    fn show(&mut self, alert: &Alert);
}

/// Deliver an alert if permitted. Returns whether it was shown.
pub fn deliver<N: Notifier + ?Sized>(notifier: &mut N, alert: &Alert) -> bool {
    match notifier.permission() {
        Permission::Granted => {
            notifier.show(alert);
            true
        }
        Permission::Denied => {
            tracing::warn!(title = %alert.title, "notification permission denied; alert dropped");
            false
        }
    }
}

/// Notifier that records alerts in memory.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    permission: Permission,
    shown: Vec<Alert>,
}

impl RecordingNotifier {
    pub fn new(permission: Permission) -> Self {
        Self {
            permission,
            shown: Vec::new(),
        }
    }

    pub fn shown(&self) -> &[Alert] {
        &self.shown
    }
}

impl Notifier for RecordingNotifier {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn show(&mut self, alert: &Alert) {
        self.shown.push(alert.clone());
    }
}
