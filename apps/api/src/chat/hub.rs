//! In-process fanout of newly created messages to open chat viewers.
//!
//! One broadcast channel per match, created lazily on first use. Delivery is
//! best-effort: subscribers that joined after a message was published rely on
//! the initial full fetch, and lagging receivers simply miss frames.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::matching::MessageRow;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Default)]
pub struct ChatHub {
    channels: Mutex<HashMap<Uuid, broadcast::Sender<String>>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to live message frames for one match.
    pub fn subscribe(&self, match_id: Uuid) -> broadcast::Receiver<String> {
        let mut channels = self.channels.lock().expect("chat hub lock poisoned");
        channels
            .entry(match_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publishes a stored message to any open viewers of its match.
    /// Channels with no remaining subscribers are dropped.
    pub fn publish(&self, message: &MessageRow) {
        let frame = match serde_json::to_string(message) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to serialize message for fanout: {e}");
                return;
            }
        };

        let mut channels = self.channels.lock().expect("chat hub lock poisoned");
        if let Some(tx) = channels.get(&message.match_id) {
            if tx.send(frame).is_err() {
                channels.remove(&message.match_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(match_id: Uuid, content: &str) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            match_id,
            sender_id: Uuid::new_v4(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_message() {
        let hub = ChatHub::new();
        let match_id = Uuid::new_v4();
        let mut rx = hub.subscribe(match_id);

        hub.publish(&message(match_id, "hello"));

        let frame = rx.recv().await.unwrap();
        let row: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(row["content"], "hello");
        assert_eq!(row["match_id"], match_id.to_string());
    }

    #[tokio::test]
    async fn test_publish_is_scoped_to_match() {
        let hub = ChatHub::new();
        let match_a = Uuid::new_v4();
        let match_b = Uuid::new_v4();
        let mut rx_a = hub.subscribe(match_a);
        let _rx_b = hub.subscribe(match_b);

        hub.publish(&message(match_b, "for b only"));

        assert!(matches!(
            rx_a.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = ChatHub::new();
        // No subscriber was ever registered for this match.
        hub.publish(&message(Uuid::new_v4(), "into the void"));
    }

    #[tokio::test]
    async fn test_channel_removed_after_last_subscriber_drops() {
        let hub = ChatHub::new();
        let match_id = Uuid::new_v4();
        let rx = hub.subscribe(match_id);
        drop(rx);

        hub.publish(&message(match_id, "nobody home"));
        assert!(hub.channels.lock().unwrap().get(&match_id).is_none());
    }
}
