//! Notification sinks.
//!
//! [`TracingNotifier`] turns toasts into log events (used by the CLI).
//! [`BroadcastNotifier`] fans them out on a broadcast channel so any number of
//! UI layers can subscribe independently.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use firestock_core::Notifier;

/// Default channel capacity for [`BroadcastNotifier`].
const DEFAULT_CAPACITY: usize = 64;

/// A toast emitted by a request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Notification {
    Success { message: String },
    Error { title: String, description: String },
}

impl Notification {
    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error { .. })
    }
}

/// Logs notifications instead of showing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        info!(subsystem = "notify", "{}", message);
    }

    fn notify_error(&self, title: &str, description: &str) {
        warn!(subsystem = "notify", error = description, "{}", title);
    }
}

/// Publishes notifications on a `tokio::sync::broadcast` channel.
///
/// Sending never blocks; notifications emitted while nobody is subscribed are
/// dropped.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn publish(&self, notification: Notification) {
        // Err only means there are no subscribers right now
        let _ = self.tx.send(notification);
    }
}

impl Notifier for BroadcastNotifier {
    fn notify_success(&self, message: &str) {
        self.publish(Notification::Success {
            message: message.to_string(),
        });
    }

    fn notify_error(&self, title: &str, description: &str) {
        self.publish(Notification::Error {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}
