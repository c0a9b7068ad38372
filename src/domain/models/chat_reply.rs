use serde::{Deserialize, Serialize};

use super::Message;

/// Refusal returned for questions that are not about programming.
pub const REJECTION_MESSAGE: &str = "⚠️ This chatbox is exclusively for coding-related questions. \
Please ask a question about programming, software development, algorithms, or any technical \
computer science topic.";

/// Outcome of handling a single accepted-or-rejected submission.
///
/// Hard failures are not represented here; they surface as
/// [`crate::domain::DomainError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatReply {
    Answer { text: String },
    Rejected { message: String },
}

impl ChatReply {
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer { text: text.into() }
    }

    pub fn rejected() -> Self {
        Self::Rejected {
            message: REJECTION_MESSAGE.to_string(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    pub fn is_coding_related(&self) -> bool {
        !self.is_rejected()
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Answer { text } => text,
            Self::Rejected { message } => message,
        }
    }

    /// The assistant message this reply should be persisted as.
    pub fn into_message(self, conversation_id: Option<String>) -> Message {
        match self {
            Self::Answer { text } => Message::answer(text, conversation_id),
            Self::Rejected { message } => Message::rejection(message, conversation_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_reply_becomes_marked_message() {
        let msg = ChatReply::rejected().into_message(Some("c1".into()));
        assert!(msg.is_rejection());
        assert!(msg.content().starts_with("⚠️ This chatbox is exclusively for coding-related questions"));
    }

    #[test]
    fn answer_reply_becomes_unmarked_message() {
        let msg = ChatReply::answer("use reversed()").into_message(None);
        assert_eq!(msg.is_coding_related(), None);
        assert_eq!(msg.content(), "use reversed()");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(ChatReply::answer("x")).unwrap();
        assert_eq!(json["kind"], "answer");
        let json = serde_json::to_value(ChatReply::rejected()).unwrap();
        assert_eq!(json["kind"], "rejected");
    }
}
