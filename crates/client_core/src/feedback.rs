//! Outbound seams to the host UI: toast-style notifications and screen navigation.

use std::time::Duration;

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            duration,
        }
    }

    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(NotificationLevel::Success, message, duration)
    }

    pub fn info(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(NotificationLevel::Info, message, duration)
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(NotificationLevel::Error, message, duration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Push,
    /// Replace the current history entry instead of adding one.
    Replace,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, mode: NavigationMode);
}
