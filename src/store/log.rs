use std::sync::{Arc, Mutex};

use tracing::debug;

use super::models::Message;

/// Store handle shared between the ingest task (sole writer) and the
/// presentation shell (readers). A single mutex is enough at dashboard
/// message rates.
pub type SharedMessageStore = Arc<Mutex<MessageStore>>;

/// Append-only, insertion-ordered log of received messages. Lives for the
/// whole process; there is no eviction and no persistence.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedMessageStore {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn append(&mut self, message: Message) {
        debug!(
            "Storing message {} on topic '{}' ({} total)",
            message.id,
            message.topic,
            self.messages.len() + 1
        );
        self.messages.push(message);
    }

    /// Full log in insertion order.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The `n` most recent messages, newest first. Returns fewer when the
    /// store holds fewer.
    pub fn last(&self, n: usize) -> Vec<&Message> {
        self.messages.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(payload: &str) -> Message {
        Message::new("Muhendislik".to_string(), payload.to_string())
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = MessageStore::new();
        for i in 0..5 {
            store.append(msg(&format!("payload-{}", i)));
        }
        assert_eq!(store.len(), 5);
        let payloads: Vec<_> = store.all().iter().map(|m| m.payload.as_str()).collect();
        assert_eq!(
            payloads,
            ["payload-0", "payload-1", "payload-2", "payload-3", "payload-4"]
        );
    }

    #[test]
    fn latest_returns_most_recent_append() {
        let mut store = MessageStore::new();
        assert!(store.latest().is_none());
        store.append(msg("first"));
        store.append(msg("second"));
        assert_eq!(store.latest().map(|m| m.payload.as_str()), Some("second"));
    }

    #[test]
    fn last_returns_reverse_chronological_suffix() {
        let mut store = MessageStore::new();
        for i in 0..4 {
            store.append(msg(&format!("payload-{}", i)));
        }
        let preview: Vec<_> = store.last(3).iter().map(|m| m.payload.as_str()).collect();
        assert_eq!(preview, ["payload-3", "payload-2", "payload-1"]);
    }

    #[test]
    fn last_clamps_to_store_length() {
        let mut store = MessageStore::new();
        store.append(msg("only"));
        let preview = store.last(10);
        assert_eq!(preview.len(), 1);
        assert_eq!(preview[0].payload, "only");
        assert!(MessageStore::new().last(3).is_empty());
    }

    #[test]
    fn received_at_is_non_decreasing() {
        let mut store = MessageStore::new();
        for _ in 0..10 {
            store.append(msg("{}"));
        }
        let stamps: Vec<_> = store.all().iter().map(|m| m.received_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }
}
