use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque message identifier, unique within a single session.
///
/// Ordering of messages is carried by their position in the conversation
/// log, not by the id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates session-unique message ids from a counter and the wall clock.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> MessageId {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        MessageId(format!("msg-{}-{}", Utc::now().timestamp_millis(), seq))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single entry in the conversation log.
///
/// Assistant messages start with empty content and are extended in place
/// while the reply is revealed; `timestamp` is fixed at creation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::User, content)
    }

    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::Assistant, content)
    }

    /// Empty assistant message appended while a reply is being produced.
    pub fn assistant_placeholder(id: MessageId) -> Self {
        Self::new(id, Role::Assistant, String::new())
    }
}
