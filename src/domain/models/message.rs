use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single immutable chat message.
///
/// `is_coding_related` is only ever set on assistant messages: `Some(false)`
/// marks the refusal produced for a rejected question, `None` means an
/// ordinary answer (implicitly coding-related).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    conversation_id: Option<String>,
    role: Role,
    content: String,
    /// Creation time in milliseconds since the Unix epoch.
    timestamp: i64,
    is_coding_related: Option<bool>,
}

impl Message {
    pub fn user(content: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self::new(Role::User, content.into(), conversation_id, None)
    }

    pub fn answer(content: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self::new(Role::Assistant, content.into(), conversation_id, None)
    }

    pub fn rejection(content: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self::new(Role::Assistant, content.into(), conversation_id, Some(false))
    }

    fn new(
        role: Role,
        content: String,
        conversation_id: Option<String>,
        is_coding_related: Option<bool>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id,
            role,
            content,
            timestamp: current_timestamp_millis(),
            is_coding_related,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(
        id: String,
        conversation_id: Option<String>,
        role: Role,
        content: String,
        timestamp: i64,
        is_coding_related: Option<bool>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            role,
            content,
            timestamp,
            is_coding_related,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn is_coding_related(&self) -> Option<bool> {
        self.is_coding_related
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// True for the assistant refusal emitted when a question was not about
    /// programming. Renderers use this instead of inspecting the content.
    pub fn is_rejection(&self) -> bool {
        self.role == Role::Assistant && self.is_coding_related == Some(false)
    }
}

pub(crate) fn current_timestamp_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
