//! User-facing notifications
//!
//! Pages publish one-shot success/failure events instead of blocking the
//! user; any number of UI layers may subscribe.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Default number of undelivered notifications kept per subscriber
pub const NOTIFICATION_CAPACITY: usize = 64;

/// Whether an action succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// The action succeeded
    Success,
    /// The action failed
    Failure,
}

/// A one-shot event for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Outcome
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
}

impl Notification {
    /// Success notification
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Failure notification
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
        }
    }

    /// Whether this reports a success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, NotificationKind::Success)
    }
}

/// Broadcast channel for notifications
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Notifier {
    /// Create a notifier buffering up to `capacity` events per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to notifications published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Publish a notification, returning how many subscribers received it
    pub fn publish(&self, notification: Notification) -> usize {
        match self.sender.send(notification) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(dropped)) => {
                debug!(message = %dropped.message, "No notification subscribers");
                0
            }
        }
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_CAPACITY)
    }
}
