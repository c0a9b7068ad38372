use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::application::use_cases::{AnswerGenerator, QuestionClassifier};
use crate::application::{ChatBackend, CompletionClient};
use crate::domain::{ChatReply, DomainError};

/// Validate-then-answer flow for a single submitted message.
///
/// Classification always completes before generation starts, and generation is
/// skipped entirely for rejected questions. Nothing is cached between calls.
pub struct AnswerQuestionUseCase {
    classifier: QuestionClassifier,
    generator: AnswerGenerator,
}

impl AnswerQuestionUseCase {
    pub fn new(classifier: QuestionClassifier, generator: AnswerGenerator) -> Self {
        Self {
            classifier,
            generator,
        }
    }

    /// Classifier and generator sharing one client and model.
    pub fn with_client(client: Arc<dyn CompletionClient>, model: &str) -> Self {
        Self::new(
            QuestionClassifier::new(client.clone(), model),
            AnswerGenerator::new(client, model),
        )
    }

    pub async fn execute(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, DomainError> {
        if message.trim().is_empty() {
            return Err(DomainError::invalid_input("message must not be empty"));
        }

        info!(
            "Received question ({} chars, conversation={})",
            message.len(),
            conversation_id.unwrap_or("-")
        );
        let start_time = Instant::now();

        let accepted = self.classifier.is_coding_question(message).await.map_err(|e| {
            warn!("Question validation failed: {}", e);
            e
        })?;

        info!("Question validation result: {}", accepted);

        if !accepted {
            return Ok(ChatReply::rejected());
        }

        let answer = self.generator.generate(message).await.map_err(|e| {
            warn!("Answer generation failed: {}", e);
            e
        })?;

        info!(
            "Generated answer in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(ChatReply::answer(answer))
    }
}

#[async_trait]
impl ChatBackend for AnswerQuestionUseCase {
    async fn answer(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, DomainError> {
        self.execute(message, conversation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::adapter::MockCompletionClient;
    use crate::domain::REJECTION_MESSAGE;

    fn use_case(client: &Arc<MockCompletionClient>) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::with_client(client.clone(), "test-model")
    }

    #[tokio::test]
    async fn accepted_question_is_answered_verbatim() {
        let client = Arc::new(
            MockCompletionClient::new()
                .with_reply("YES")
                .with_reply("Use two pointers: prev and curr."),
        );

        let reply = use_case(&client)
            .execute("How do I reverse a linked list in Python?", None)
            .await
            .unwrap();

        assert_eq!(reply, ChatReply::answer("Use two pointers: prev and curr."));
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn rejected_question_skips_generation() {
        let client = Arc::new(MockCompletionClient::new().with_reply("NO"));

        let reply = use_case(&client)
            .execute("What's the weather today?", Some("c1"))
            .await
            .unwrap();

        assert!(reply.is_rejected());
        assert_eq!(reply.content(), REJECTION_MESSAGE);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn non_exact_yes_is_a_rejection() {
        for verdict in ["yes please", "", "YES!", "I think YES"] {
            let client = Arc::new(MockCompletionClient::new().with_reply(verdict));
            let reply = use_case(&client).execute("Tell me about loops", None).await.unwrap();
            assert!(reply.is_rejected(), "{verdict:?} should reject");
            assert_eq!(client.call_count(), 1, "generator must not run for {verdict:?}");
        }
    }

    #[tokio::test]
    async fn blank_input_makes_no_calls() {
        let client = Arc::new(MockCompletionClient::new());

        for input in ["", "   ", "\n\t"] {
            let err = use_case(&client).execute(input, None).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn classifier_rate_limit_propagates_without_generation() {
        let client = Arc::new(
            MockCompletionClient::new().with_error(DomainError::rate_limited("429 from provider")),
        );

        let err = use_case(&client).execute("What is Rust?", None).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn generator_payment_error_propagates() {
        let client = Arc::new(
            MockCompletionClient::new()
                .with_reply("YES")
                .with_error(DomainError::payment_required("402 from provider")),
        );

        let err = use_case(&client).execute("What is Rust?", None).await.unwrap_err();

        assert!(err.is_payment_required());
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn repeated_submissions_run_independent_cycles() {
        let client = Arc::new(
            MockCompletionClient::new()
                .with_reply("YES")
                .with_reply("first")
                .with_reply("YES")
                .with_reply("second"),
        );
        let use_case = use_case(&client);

        let a = use_case.execute("What is a trait?", None).await.unwrap();
        let b = use_case.execute("What is a trait?", None).await.unwrap();

        assert_eq!(a.content(), "first");
        assert_eq!(b.content(), "second");
        assert_eq!(client.call_count(), 4);
    }

    #[tokio::test]
    async fn works_through_chat_backend_trait() {
        let client = Arc::new(MockCompletionClient::new().with_reply("NO"));
        let backend: Arc<dyn ChatBackend> = Arc::new(use_case(&client));

        let reply = backend.answer("best pizza topping?", None).await.unwrap();
        assert!(reply.is_rejected());
    }
}
