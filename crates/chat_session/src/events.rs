use chat_core::{ChatMessage, MessageId, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::phase::SessionPhase;

/// Represents a structured update that a UI or other subscriber can consume
/// to keep an accurate replica of the current session. Each update captures
/// the phase after the change and an optional message mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// Identifier of the session that emitted this update.
    pub session_id: Uuid,

    /// The phase after applying this update.
    pub phase: SessionPhase,

    /// The phase before applying this update (if it changed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_phase: Option<SessionPhase>,

    /// Optional message-level mutation bundled in this update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_update: Option<MessageUpdate>,

    /// Timestamp when the update was produced.
    pub timestamp: DateTime<Utc>,
}

/// Describes granular mutations to messages emitted alongside a
/// [`SessionUpdate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageUpdate {
    /// A new message entered the log.
    Created { message_id: MessageId, role: Role },

    /// The in-flight assistant message grew by one reveal step.
    ContentDelta {
        message_id: MessageId,
        accumulated: String,
    },

    /// The assistant message reached its final content.
    Completed {
        message_id: MessageId,
        final_message: ChatMessage,
    },

    /// The log was replaced with a fresh greeting seed.
    Reset { seed_id: MessageId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::IdGenerator;
    use serde_json::json;

    #[test]
    fn update_serializes_with_created_message() {
        let ids = IdGenerator::new();
        let update = SessionUpdate {
            session_id: Uuid::nil(),
            phase: SessionPhase::Sending,
            previous_phase: Some(SessionPhase::Idle),
            message_update: Some(MessageUpdate::Created {
                message_id: ids.next_id(),
                role: Role::User,
            }),
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&update).expect("serialize");
        assert_eq!(value["phase"], json!("sending"));
        assert_eq!(value["previous_phase"], json!("idle"));

        let message_update = value["message_update"].as_object().expect("message update");
        assert_eq!(message_update["type"], json!("created"));
        assert_eq!(message_update["role"], json!("user"));
    }

    #[test]
    fn update_omits_absent_fields_when_serialized() {
        let update = SessionUpdate {
            session_id: Uuid::nil(),
            phase: SessionPhase::Idle,
            previous_phase: None,
            message_update: None,
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&update).expect("serialize");
        assert!(value.get("previous_phase").is_none());
        assert!(value.get("message_update").is_none());
    }

    #[test]
    fn completed_update_round_trips() {
        let ids = IdGenerator::new();
        let final_message = ChatMessage::assistant(ids.next_id(), "你好");

        let update = MessageUpdate::Completed {
            message_id: final_message.id.clone(),
            final_message: final_message.clone(),
        };

        let serialized = serde_json::to_string(&update).expect("serialize");
        let deserialized: MessageUpdate = serde_json::from_str(&serialized).expect("deserialize");

        match deserialized {
            MessageUpdate::Completed { final_message, .. } => {
                assert_eq!(final_message.role, Role::Assistant);
                assert_eq!(final_message.content, "你好");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
