use serde::{Deserialize, Serialize};

/// Role of a prompt segment sent to the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

impl PromptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptRole::System => "system",
            PromptRole::User => "user",
            PromptRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSegment {
    pub role: PromptRole,
    pub content: String,
}

impl PromptSegment {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// One text-completion call: a model identifier and the ordered prompt segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    model: String,
    segments: Vec<PromptSegment>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            segments: Vec::new(),
        }
    }

    pub fn with_segment(mut self, segment: PromptSegment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn segments(&self) -> &[PromptSegment] {
        &self.segments
    }
}
