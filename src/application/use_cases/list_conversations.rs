use std::sync::Arc;

use crate::application::ConversationStore;
use crate::domain::{Conversation, DomainError, Message};

pub struct ListConversationsUseCase {
    store: Arc<dyn ConversationStore>,
}

impl ListConversationsUseCase {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<Conversation>, DomainError> {
        self.store.list_conversations().await
    }

    /// Messages of one conversation in chronological order.
    pub async fn history(&self, conversation_id: &str) -> Result<Vec<Message>, DomainError> {
        if self.store.find_conversation(conversation_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "conversation {conversation_id}"
            )));
        }
        self.store.list_messages(conversation_id).await
    }
}
