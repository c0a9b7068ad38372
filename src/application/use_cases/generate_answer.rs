use std::sync::Arc;

use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, DomainError, PromptSegment};

/// Persona sent as the system segment of every answer request.
pub const ASSISTANT_PERSONA: &str =
    "You are an expert programming assistant. Provide accurate, helpful coding answers with examples.";

/// Builds the user prompt asking for a structured answer to `question`.
pub fn answer_prompt(question: &str) -> String {
    format!(
        "You are an expert programming assistant in Coder's Chatbox. Provide a clear, accurate, \
and helpful answer to this coding question. Include code examples when relevant. If you're not \
completely certain about the answer, provide relevant documentation links or resources.

Question: {question}

Provide a comprehensive answer with:
1. Direct answer to the question
2. Code examples if applicable
3. Best practices or important considerations
4. Links to official documentation when relevant"
    )
}

/// Produces the answer for a question that has already been accepted.
pub struct AnswerGenerator {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn build_request(&self, question: &str) -> CompletionRequest {
        CompletionRequest::new(&self.model)
            .with_segment(PromptSegment::system(ASSISTANT_PERSONA))
            .with_segment(PromptSegment::user(answer_prompt(question)))
    }

    /// Returns the provider text verbatim.
    pub async fn generate(&self, question: &str) -> Result<String, DomainError> {
        let request = self.build_request(question);
        let answer = self.client.complete(&request).await?;
        debug!("Generated answer ({} chars)", answer.len());
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::MockCompletionClient;
    use crate::domain::PromptRole;

    #[tokio::test]
    async fn returns_provider_text_verbatim() {
        let raw = "  ```python\nnode.next = prev\n```\n\n";
        let client = Arc::new(MockCompletionClient::new().with_reply(raw));
        let generator = AnswerGenerator::new(client, "m");

        assert_eq!(generator.generate("reverse a list").await.unwrap(), raw);
    }

    #[tokio::test]
    async fn request_has_persona_then_question() {
        let client = Arc::new(MockCompletionClient::new().with_reply("ok"));
        let generator = AnswerGenerator::new(client.clone(), "m");

        generator.generate("What is ownership?").await.unwrap();

        let requests = client.requests().await;
        let segments = requests[0].segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].role, PromptRole::System);
        assert_eq!(segments[0].content, ASSISTANT_PERSONA);
        assert_eq!(segments[1].role, PromptRole::User);
        assert!(segments[1].content.contains("Question: What is ownership?"));
        assert!(segments[1].content.contains("4. Links to official documentation"));
    }
}
