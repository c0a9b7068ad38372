use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::current_timestamp_millis;

/// Title given to conversations opened by a fresh chat session.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Coding Chat";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: String,
    title: String,
    created_at: i64,
}

impl Conversation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: current_timestamp_millis(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(id: String, title: String, created_at: i64) -> Self {
        Self {
            id,
            title,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}
