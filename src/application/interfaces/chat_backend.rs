use async_trait::async_trait;

use crate::domain::{ChatReply, DomainError};

/// The request handler as seen by a chat session: one question in, one reply out.
///
/// Implemented in-process by [`crate::AnswerQuestionUseCase`] and over HTTP by
/// [`crate::HttpChatBackend`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn answer(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, DomainError>;
}
