use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ConversationStore;
use crate::domain::{Conversation, DomainError, Message};

#[derive(Default)]
struct State {
    /// Creation order.
    conversations: Vec<Conversation>,
    messages: HashMap<String, Vec<Message>>,
}

pub struct InMemoryConversationStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, DomainError> {
        let conversation = Conversation::new(title);
        let mut state = self.state.lock().await;
        state
            .messages
            .insert(conversation.id().to_string(), Vec::new());
        state.conversations.push(conversation.clone());
        debug!("Created conversation {} in memory", conversation.id());
        Ok(conversation)
    }

    async fn find_conversation(&self, id: &str) -> Result<Option<Conversation>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.conversations.iter().find(|c| c.id() == id).cloned())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.conversations.iter().rev().cloned().collect())
    }

    async fn insert_message(&self, message: &Message) -> Result<(), DomainError> {
        let conversation_id = message
            .conversation_id()
            .ok_or_else(|| DomainError::invalid_input("message has no conversation id"))?;

        let mut state = self.state.lock().await;
        let messages = state
            .messages
            .get_mut(conversation_id)
            .ok_or_else(|| DomainError::not_found(format!("conversation {conversation_id}")))?;
        messages.push(message.clone());
        Ok(())
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn messages_keep_insertion_order() {
        let store = InMemoryConversationStore::new();
        let conv = store.create_conversation("t").await.unwrap();

        for text in ["one", "two", "three"] {
            let msg = Message::user(text, Some(conv.id().to_string()));
            store.insert_message(&msg).await.unwrap();
        }

        let contents: Vec<String> = store
            .list_messages(conv.id())
            .await
            .unwrap()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn rejects_unknown_conversation() {
        let store = InMemoryConversationStore::new();
        let msg = Message::user("orphan", Some("missing".to_string()));

        let err = store.insert_message(&msg).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn rejects_message_without_conversation() {
        let store = InMemoryConversationStore::new();
        let err = store
            .insert_message(&Message::user("loose", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn lists_newest_conversation_first() {
        let store = InMemoryConversationStore::new();
        let first = store.create_conversation("first").await.unwrap();
        let second = store.create_conversation("second").await.unwrap();

        let listed = store.list_conversations().await.unwrap();
        assert_eq!(listed[0].id(), second.id());
        assert_eq!(listed[1].id(), first.id());
        assert!(store.find_conversation(first.id()).await.unwrap().is_some());
        assert!(store.find_conversation("nope").await.unwrap().is_none());
    }
}
