//! Forwards controller feedback to the terminal renderer thread.

use std::thread::{self, JoinHandle};

use client_core::{NavigationMode, Navigator, Notification, NotificationLevel, Notifier};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Notify(Notification),
    Navigate { path: String, mode: NavigationMode },
    Closed,
}

impl UiEvent {
    fn kind(&self) -> &'static str {
        match self {
            UiEvent::Notify(_) => "notify",
            UiEvent::Navigate { .. } => "navigate",
            UiEvent::Closed => "closed",
        }
    }
}

#[derive(Clone)]
pub struct UiBridge {
    ui_tx: Sender<UiEvent>,
}

pub fn channel(capacity: usize) -> (UiBridge, Receiver<UiEvent>) {
    let (ui_tx, ui_rx) = bounded(capacity);
    (UiBridge { ui_tx }, ui_rx)
}

impl UiBridge {
    /// Returns `false` when the event could not be queued.
    pub fn dispatch(&self, event: UiEvent) -> bool {
        let kind = event.kind();
        match self.ui_tx.try_send(event) {
            Ok(()) => {
                tracing::debug!(event = kind, "queued controller->ui event");
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(event = kind, "ui event queue is full; event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::warn!(event = kind, "ui renderer disconnected; event dropped");
                false
            }
        }
    }

    /// Asks the renderer to drain and exit. Blocks while the queue is full.
    pub fn close(&self) {
        if self.ui_tx.send(UiEvent::Closed).is_err() {
            tracing::debug!("ui renderer already gone");
        }
    }
}

impl Notifier for UiBridge {
    fn notify(&self, notification: Notification) {
        self.dispatch(UiEvent::Notify(notification));
    }
}

impl Navigator for UiBridge {
    fn navigate(&self, path: &str, mode: NavigationMode) {
        self.dispatch(UiEvent::Navigate {
            path: path.to_string(),
            mode,
        });
    }
}

pub fn render_event(event: &UiEvent) -> String {
    match event {
        UiEvent::Notify(notification) => {
            let level = match notification.level {
                NotificationLevel::Success => "success",
                NotificationLevel::Info => "info",
                NotificationLevel::Error => "error",
            };
            format!(
                "[{level}] {} ({}ms)",
                notification.message,
                notification.duration.as_millis()
            )
        }
        UiEvent::Navigate { path, mode } => match mode {
            NavigationMode::Push => format!("-> {path}"),
            NavigationMode::Replace => format!("-> {path} (replace)"),
        },
        UiEvent::Closed => "[closed]".to_string(),
    }
}

/// Prints events until [`UiEvent::Closed`] or until every sender is gone.
/// Yields the rendered lines so callers can inspect what was shown.
pub fn spawn_renderer(ui_rx: Receiver<UiEvent>) -> JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut shown = Vec::new();
        for event in ui_rx.iter() {
            if event == UiEvent::Closed {
                break;
            }
            let line = render_event(&event);
            println!("{line}");
            shown.push(line);
        }
        shown
    })
}

#[cfg(test)]
#[path = "tests/bridge_tests.rs"]
mod tests;
