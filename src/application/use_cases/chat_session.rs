use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::application::{ChatBackend, ConversationStore};
use crate::domain::{DomainError, Message, DEFAULT_CONVERSATION_TITLE};

/// A user-facing notification raised by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    pub fn non_coding() -> Self {
        Self {
            title: "Non-Coding Question Detected",
            description: "Please ask questions related to programming and software development.",
        }
    }

    pub fn failure() -> Self {
        Self {
            title: "Error",
            description: "Failed to get response. Please try again.",
        }
    }
}

/// What happened to a call to [`ChatSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input or a request already in flight; nothing changed.
    Ignored,
    Answered,
    Rejected { notice: Notice },
    /// No assistant message was added.
    Failed { notice: Notice },
}

/// A question accepted by [`ChatSession::begin`] and awaiting its reply.
#[derive(Debug)]
pub struct PendingQuestion {
    message: Message,
}

impl PendingQuestion {
    pub fn content(&self) -> &str {
        self.message.content()
    }
}

/// In-memory state of one chat window: the rendered message list, the input
/// box, and the loading flag.
///
/// The message list is the source of render truth. The store is write-only
/// from here and its failures never reach the user.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn ConversationStore>,
    conversation_id: Option<String>,
    opened: bool,
    messages: Vec<Message>,
    input: String,
    is_loading: bool,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            backend,
            store,
            conversation_id: None,
            opened: false,
            messages: Vec::new(),
            input: String::new(),
            is_loading: false,
        }
    }

    /// Creates the backing conversation. Runs at most once per session; on
    /// failure the session keeps working without persistence.
    pub async fn open(&mut self) {
        if self.opened {
            return;
        }
        self.opened = true;

        match self.store.create_conversation(DEFAULT_CONVERSATION_TITLE).await {
            Ok(conversation) => {
                debug!("Opened conversation {}", conversation.id());
                self.conversation_id = Some(conversation.id().to_string());
            }
            Err(e) => error!("Error creating conversation: {}", e),
        }
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_loading
    }

    /// Optimistically appends the user's message, clears the input and marks
    /// the session as loading. Returns `None` when submission is not allowed.
    pub fn begin(&mut self) -> Option<PendingQuestion> {
        if !self.can_submit() {
            return None;
        }

        let message = Message::user(self.input.trim(), self.conversation_id.clone());
        self.messages.push(message.clone());
        self.input.clear();
        self.is_loading = true;

        Some(PendingQuestion { message })
    }

    /// Sends a pending question to the backend and records exactly one
    /// assistant message on success.
    pub async fn complete(&mut self, pending: PendingQuestion) -> SubmitOutcome {
        self.persist(&pending.message).await;

        let result = self
            .backend
            .answer(pending.message.content(), self.conversation_id.as_deref())
            .await;

        let outcome = match result {
            Ok(reply) => {
                let coding_related = reply.is_coding_related();
                let message = reply.into_message(self.conversation_id.clone());
                self.messages.push(message.clone());
                self.persist(&message).await;

                if coding_related {
                    SubmitOutcome::Answered
                } else {
                    SubmitOutcome::Rejected {
                        notice: Notice::non_coding(),
                    }
                }
            }
            Err(e) => {
                error!("Chat request failed: {}", e);
                SubmitOutcome::Failed {
                    notice: Notice::failure(),
                }
            }
        };

        self.is_loading = false;
        outcome
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin() {
            Some(pending) => self.complete(pending).await,
            None => SubmitOutcome::Ignored,
        }
    }

    async fn persist(&self, message: &Message) {
        if self.conversation_id.is_none() {
            return;
        }
        if let Err(e) = self.store.insert_message(message).await {
            log_persistence_failure(message, &e);
        }
    }
}

fn log_persistence_failure(message: &Message, error: &DomainError) {
    warn!(
        "Failed to save {} message {}: {}",
        message.role(),
        message.id(),
        error
    );
}
