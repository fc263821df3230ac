//! Notification events published to the `notification` Kafka topic
//!
//! The producer never persists these; they exist only on the wire and are
//! consumed by downstream delivery services.

use serde::{Deserialize, Serialize};

/// Kind of engagement that triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Like,
    Comment,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Like => write!(f, "LIKE"),
            NotificationType::Comment => write!(f, "COMMENT"),
        }
    }
}

/// A single like/comment notification
///
/// `comment_id` is only present for COMMENT events and is omitted from the
/// JSON payload otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub sender_id: i64,
    pub recipient_id: i64,
    pub notification_type: NotificationType,
    pub post_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<i64>,
}

impl NotificationEvent {
    pub fn like(sender_id: i64, recipient_id: i64, post_id: i64) -> Self {
        Self {
            sender_id,
            recipient_id,
            notification_type: NotificationType::Like,
            post_id,
            comment_id: None,
        }
    }

    pub fn comment(sender_id: i64, recipient_id: i64, post_id: i64, comment_id: i64) -> Self {
        Self {
            sender_id,
            recipient_id,
            notification_type: NotificationType::Comment,
            post_id,
            comment_id: Some(comment_id),
        }
    }

    /// Partition key; notifications for one recipient stay ordered
    pub fn key(&self) -> String {
        self.recipient_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_event_omits_comment_id() {
        let event = NotificationEvent::like(7, 3, 42);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["sender_id"], 7);
        assert_eq!(json["recipient_id"], 3);
        assert_eq!(json["notification_type"], "LIKE");
        assert_eq!(json["post_id"], 42);
        assert!(json.get("comment_id").is_none());
    }

    #[test]
    fn comment_event_round_trips() {
        let event = NotificationEvent::comment(1, 2, 42, 99);
        let json = serde_json::to_string(&event).unwrap();
        let back: NotificationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.notification_type, NotificationType::Comment);
        assert_eq!(back.comment_id, Some(99));
    }

    #[test]
    fn key_is_recipient() {
        assert_eq!(NotificationEvent::like(1, 33, 5).key(), "33");
    }
}
