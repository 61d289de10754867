//! The in-memory chat transcript store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use agentpay_core::{ChatMessage, RichContent};

/// The chat transcript plus the agent "typing" flag.
///
/// The store only records; driving the engine off a new user message is
/// the entry point's job, so sessions stay independently constructible.
#[derive(Debug, Default)]
pub struct ChatStore {
    messages: Mutex<Vec<ChatMessage>>,
    typing: AtomicBool,
}

impl ChatStore {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a user message.
    pub fn add_user_message(&self, text: &str) -> ChatMessage {
        let message = ChatMessage::user(text);
        self.lock().push(message.clone());
        message
    }

    /// Record an agent reply and clear the typing flag.
    pub fn add_agent_message(
        &self,
        text: impl Into<String>,
        rich_content: Option<RichContent>,
    ) -> ChatMessage {
        let message = ChatMessage::agent(text, rich_content);
        self.lock().push(message.clone());
        self.typing.store(false, Ordering::SeqCst);
        message
    }

    /// Set the typing indicator.
    pub fn set_typing(&self, typing: bool) {
        self.typing.store(typing, Ordering::SeqCst);
    }

    /// Whether the agent is marked as typing.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::SeqCst)
    }

    /// Snapshot of the transcript in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    /// The most recent message, if any.
    #[must_use]
    pub fn last(&self) -> Option<ChatMessage> {
        self.lock().last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpay_core::MessageRole;

    #[test]
    fn test_messages_keep_arrival_order() {
        let chat = ChatStore::new();
        chat.add_user_message("hi");
        chat.add_agent_message("Welcome!", None);
        chat.add_user_message("show products");

        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages.first().map(|m| m.role), Some(MessageRole::User));
        assert_eq!(messages.get(1).map(|m| m.role), Some(MessageRole::Agent));
    }

    #[test]
    fn test_agent_message_clears_typing() {
        let chat = ChatStore::new();
        chat.set_typing(true);
        assert!(chat.is_typing());
        chat.add_agent_message("done", None);
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_agent_message_carries_rich_content() {
        let chat = ChatStore::new();
        chat.add_agent_message("Processing your payment...", Some(RichContent::Processing));
        let last = chat.last().expect("message recorded");
        assert_eq!(last.rich_content, Some(RichContent::Processing));
    }
}
