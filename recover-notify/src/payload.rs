//! Webhook payloads delivered by Postgres triggers.
//!
//! Triggers post `{ "record": ..., "old_record": ... }` envelopes; the
//! record is the row that changed. Fields beyond what the handlers need
//! are ignored.

use serde::Deserialize;
use std::fmt;

/// Envelope for an insert on `messages`.
#[derive(Debug, Deserialize)]
pub struct MessageWebhook {
    #[serde(default)]
    pub record: Option<MessageRecord>,
}

/// A row from the `messages` table.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    pub sender_id: String,
    pub receiver_id: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Envelope for an update on `items`.
#[derive(Debug, Deserialize)]
pub struct ItemFoundWebhook {
    #[serde(default)]
    pub record: Option<ItemRecord>,
    #[serde(default)]
    pub old_record: Option<ItemSnapshot>,
}

/// A row from the `items` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub id: RecordId,
    pub owner_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ItemRecord {
    /// Title for display: `title`, then `name`, then a generic fallback.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("Seu item")
    }

    pub fn is_found(&self) -> bool {
        self.status.as_deref() == Some("found")
    }
}

/// The pre-update image of an `items` row.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSnapshot {
    #[serde(default)]
    pub status: Option<String>,
}

impl ItemSnapshot {
    pub fn is_found(&self) -> bool {
        self.status.as_deref() == Some("found")
    }
}

/// Primary key of a webhook record; triggers deliver integers or UUIDs
/// depending on the table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_webhook_deserializes() {
        let webhook: MessageWebhook = serde_json::from_str(
            r#"{"record": {"sender_id": "u1", "receiver_id": "u2", "content": "oi", "created_at": "2026-01-01"}}"#,
        )
        .unwrap();
        let record = webhook.record.unwrap();
        assert_eq!(record.sender_id, "u1");
        assert_eq!(record.receiver_id, "u2");
        assert_eq!(record.content.as_deref(), Some("oi"));
    }

    #[test]
    fn test_missing_record_is_none() {
        let webhook: MessageWebhook = serde_json::from_str(r#"{"type": "INSERT"}"#).unwrap();
        assert!(webhook.record.is_none());
    }

    #[test]
    fn test_item_webhook_with_old_record() {
        let webhook: ItemFoundWebhook = serde_json::from_str(
            r#"{"record": {"id": 7, "owner_id": "u1", "title": "Carteira", "status": "found"},
                "old_record": {"id": 7, "owner_id": "u1", "status": "lost"}}"#,
        )
        .unwrap();
        let record = webhook.record.unwrap();
        assert!(record.is_found());
        assert!(!webhook.old_record.unwrap().is_found());
        assert_eq!(record.id, RecordId::Number(7));
    }

    #[test]
    fn test_record_id_accepts_uuid_strings() {
        let webhook: ItemFoundWebhook = serde_json::from_str(
            r#"{"record": {"id": "a2a7e60e-0b1f-4a5e-9d5e-0c9a3f1b2c3d", "owner_id": "u1"}}"#,
        )
        .unwrap();
        let record = webhook.record.unwrap();
        assert_eq!(record.id.to_string(), "a2a7e60e-0b1f-4a5e-9d5e-0c9a3f1b2c3d");
        assert!(!record.is_found());
    }

    #[test]
    fn test_display_title_fallbacks() {
        let titled: ItemRecord =
            serde_json::from_str(r#"{"id": 1, "owner_id": "u", "title": "Chaves"}"#).unwrap();
        assert_eq!(titled.display_title(), "Chaves");

        let named: ItemRecord =
            serde_json::from_str(r#"{"id": 1, "owner_id": "u", "title": "", "name": "Mochila"}"#)
                .unwrap();
        assert_eq!(named.display_title(), "Mochila");

        let bare: ItemRecord = serde_json::from_str(r#"{"id": 1, "owner_id": "u"}"#).unwrap();
        assert_eq!(bare.display_title(), "Seu item");
    }
}
