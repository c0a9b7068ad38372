use async_trait::async_trait;

use crate::domain::{Conversation, DomainError, Message};

/// Persistence for conversations and their messages.
///
/// Messages are append-only: there is no update or delete.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, DomainError>;

    async fn find_conversation(&self, id: &str) -> Result<Option<Conversation>, DomainError>;

    /// Most recently created first.
    async fn list_conversations(&self) -> Result<Vec<Conversation>, DomainError>;

    /// Appends `message` to its conversation. Fails with
    /// [`DomainError::NotFound`] when the conversation does not exist and with
    /// [`DomainError::InvalidInput`] when the message carries no conversation id.
    async fn insert_message(&self, message: &Message) -> Result<(), DomainError>;

    /// Messages in insertion order.
    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, DomainError>;
}
