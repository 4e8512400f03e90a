use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

impl NotificationLevel {
    /// Alert style the toast is rendered with.
    pub const fn style(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "danger",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Info => "info-circle",
            Self::Error => "exclamation-circle",
        }
    }
}

/// Transient toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn filters_cleared() -> Self {
        Self::success("All filters cleared!")
    }
}

/// Outbound seam for toasts so actions can be exercised without a terminal.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Collects notifications in memory; handy for tests and replayed sessions.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_alert_styles_and_icons() {
        assert_eq!(NotificationLevel::Success.style(), "success");
        assert_eq!(NotificationLevel::Error.style(), "danger");
        assert_eq!(NotificationLevel::Info.icon(), "info-circle");
        assert_eq!(NotificationLevel::Error.icon(), "exclamation-circle");
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::default();
        notifier.notify(Notification::filters_cleared());
        notifier.notify(Notification::info("second"));

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "All filters cleared!");
        assert_eq!(events[1].level, NotificationLevel::Info);
    }
}
