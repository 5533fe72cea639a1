// src/core/notifier.rs
//! In-process fan-out of notification changes to live subscribers

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::trace;

use crate::core::models::Notification;

const CHANNEL_CAPACITY: usize = 256;

/// What happened to a user's notifications
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum NotificationChange {
    Created { notification: Notification },
    Read { id: String },
    AllRead,
    Deleted { id: String },
    Cleared,
}

#[derive(Debug, Clone)]
pub struct NotificationEvent {
    pub user_id: String,
    pub change: NotificationChange,
}

#[derive(Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<NotificationEvent>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, user_id: &str, change: NotificationChange) {
        let event = NotificationEvent {
            user_id: user_id.to_string(),
            change,
        };
        // No subscribers is the common case
        if let Ok(receivers) = self.sender.send(event) {
            trace!("Notification change for {} sent to {} stream(s)", user_id, receivers);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_changes() {
        let hub = NotificationHub::new();
        hub.publish("nobody-listening", NotificationChange::Cleared);

        let mut first = hub.subscribe();
        let mut second = hub.subscribe();
        hub.publish("s1", NotificationChange::Read { id: "n1".to_string() });

        for receiver in [&mut first, &mut second] {
            let event = receiver.recv().await.unwrap();
            assert_eq!(event.user_id, "s1");
            assert!(matches!(event.change, NotificationChange::Read { ref id } if id == "n1"));
        }
    }

    #[test]
    fn test_change_wire_format() {
        let json = serde_json::to_value(NotificationChange::Deleted {
            id: "n1".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "event": "deleted", "id": "n1" }));
        assert_eq!(
            serde_json::to_value(NotificationChange::AllRead).unwrap(),
            serde_json::json!({ "event": "allRead" })
        );
    }
}
