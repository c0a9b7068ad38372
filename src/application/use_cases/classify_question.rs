use std::sync::Arc;

use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, DomainError, PromptSegment};

const VALIDATION_PROMPT_HEADER: &str = "\
You are a coding question validator. Your job is to determine whether a question \
is about programming or software topics.";

const VALIDATION_PROMPT_RULES: &str = "\
Return \"YES\" if the question is about:
- Programming languages (Python, JavaScript, Java, C++, Rust, etc.)
- Software development, debugging, or code review
- Algorithms, data structures, or computer science concepts
- Web development, mobile apps, or software tools
- Code examples, syntax, or programming concepts
- APIs, databases, frameworks, or libraries

Return \"NO\" ONLY if the question is clearly about non-technical topics like:
- Weather, cooking, sports, entertainment
- General knowledge not related to technology
- Personal advice, jokes, or casual conversation

Even vague coding requests like \"give me code\" or \"help with programming\" should return YES.

Respond with ONLY \"YES\" or \"NO\".";

/// Builds the single user prompt asking the model for a YES/NO verdict on `question`.
pub fn validation_prompt(question: &str) -> String {
    format!("{VALIDATION_PROMPT_HEADER}\n\nQuestion: \"{question}\"\n\n{VALIDATION_PROMPT_RULES}")
}

/// Decision rule for the classifier's raw response.
///
/// Only an exact `YES` (after trimming and upper-casing) is accepted; anything
/// else, including `yes please` or an empty body, is a rejection. This is brittle
/// against phrasing drift in the provider and is kept exact on purpose.
pub fn is_affirmative(response: &str) -> bool {
    response.trim().to_uppercase() == "YES"
}

/// Decides whether a question is programming-related by asking the completion
/// provider for a binary verdict.
pub struct QuestionClassifier {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl QuestionClassifier {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn build_request(&self, question: &str) -> CompletionRequest {
        CompletionRequest::new(&self.model).with_segment(PromptSegment::user(validation_prompt(question)))
    }

    /// Client failures propagate unchanged; there is no fallback heuristic.
    pub async fn is_coding_question(&self, question: &str) -> Result<bool, DomainError> {
        let request = self.build_request(question);
        let response = self.client.complete(&request).await?;
        let accepted = is_affirmative(&response);
        debug!("Classifier raw response {:?} -> accepted={}", response, accepted);
        Ok(accepted)
    }
}
