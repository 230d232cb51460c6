use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parser;

/// A received broker message together with the fields parsed out of it.
/// Immutable after construction; the derived fields are computed once from
/// the raw payload and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub topic: String,
    pub payload: String,
    pub received_at: DateTime<Utc>,
    pub free_spaces: Option<String>,
    pub info_text: Option<String>,
}

impl Message {
    pub fn new(topic: String, payload: String) -> Self {
        let parsed = parser::parse_payload(&payload);
        Self {
            id: Uuid::new_v4(),
            topic,
            payload,
            received_at: Utc::now(),
            free_spaces: parsed.free_spaces,
            info_text: parsed.info_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_parses_known_fields() {
        let msg = Message::new(
            "Muhendislik".to_string(),
            r#"{"otopark_bos_alan":"12","bilgilendirme":"Giriş kapalı"}"#.to_string(),
        );
        assert_eq!(msg.free_spaces.as_deref(), Some("12"));
        assert_eq!(msg.info_text.as_deref(), Some("Giriş kapalı"));
        assert_eq!(msg.topic, "Muhendislik");
    }

    #[test]
    fn construction_keeps_unparseable_payload() {
        let msg = Message::new("Muhendislik".to_string(), "not json".to_string());
        assert_eq!(msg.payload, "not json");
        assert!(msg.free_spaces.is_none());
        assert!(msg.info_text.is_none());
    }

    #[test]
    fn ids_are_unique() {
        let a = Message::new("t".to_string(), "{}".to_string());
        let b = Message::new("t".to_string(), "{}".to_string());
        assert_ne!(a.id, b.id);
    }
}
