//! Append-only conversation log.

use chat_core::{ChatMessage, MessageId};

/// Ordered sequence of messages with stable identity.
///
/// Entries are never reordered or deleted; the only removal is `reset`,
/// which replaces the whole log with a single seed message.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: ChatMessage) -> Self {
        Self {
            messages: vec![seed],
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Replace the content of the message with `id`.
    ///
    /// Returns `false` when the id is no longer present — the guard that
    /// keeps late-resolving work from writing into a reset log.
    pub fn update_content(&mut self, id: &MessageId, content: impl Into<String>) -> bool {
        match self.messages.iter_mut().find(|message| &message.id == id) {
            Some(message) => {
                message.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Discard everything and install a single seed message.
    pub fn reset(&mut self, seed: ChatMessage) {
        self.messages.clear();
        self.messages.push(seed);
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|message| &message.id == id)
    }

    pub fn get(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|message| &message.id == id)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::IdGenerator;

    #[test]
    fn append_preserves_insertion_order() {
        let ids = IdGenerator::new();
        let mut log = ConversationLog::new();

        log.append(ChatMessage::user(ids.next_id(), "one"));
        log.append(ChatMessage::assistant(ids.next_id(), "two"));
        log.append(ChatMessage::user(ids.next_id(), "three"));

        let contents: Vec<&str> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn update_content_touches_exactly_one_message() {
        let ids = IdGenerator::new();
        let mut log = ConversationLog::new();

        log.append(ChatMessage::user(ids.next_id(), "question"));
        let target = ChatMessage::assistant_placeholder(ids.next_id());
        let target_id = target.id.clone();
        log.append(target);

        assert!(log.update_content(&target_id, "partial"));

        assert_eq!(log.messages()[0].content, "question");
        assert_eq!(log.messages()[1].content, "partial");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn update_content_is_idempotent() {
        let ids = IdGenerator::new();
        let mut log = ConversationLog::new();

        let target = ChatMessage::assistant_placeholder(ids.next_id());
        let target_id = target.id.clone();
        log.append(target);

        assert!(log.update_content(&target_id, "final"));
        assert!(log.update_content(&target_id, "final"));

        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].content, "final");
    }

    #[test]
    fn update_content_on_a_missing_id_is_a_no_op() {
        let ids = IdGenerator::new();
        let mut log = ConversationLog::new();

        let stale = ChatMessage::assistant_placeholder(ids.next_id());
        let stale_id = stale.id.clone();
        log.append(stale);
        log.reset(ChatMessage::assistant(ids.next_id(), "greeting"));

        assert!(!log.update_content(&stale_id, "late reply"));
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].content, "greeting");
    }

    #[test]
    fn reset_installs_exactly_the_seed() {
        let ids = IdGenerator::new();
        let mut log = ConversationLog::new();

        log.append(ChatMessage::user(ids.next_id(), "a"));
        log.append(ChatMessage::assistant(ids.next_id(), "b"));

        log.reset(ChatMessage::assistant(ids.next_id(), "greeting"));

        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().content, "greeting");
    }
}
