pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AnswerGenerator, AnswerQuestionUseCase, ChatBackend, ChatSession, CompletionClient,
    ConversationStore, ListConversationsUseCase, Notice, QuestionClassifier, SubmitOutcome,
};

pub use cli::Commands;

pub use connector::{
    DuckdbConversationStore, GatewayCompletionClient, HttpChatBackend,
    InMemoryConversationStore, MockCompletionClient, ProviderConfig,
};

pub use domain::{
    ChatReply, CompletionRequest, Conversation, DomainError, Message, PromptRole, PromptSegment,
    Role, DEFAULT_CONVERSATION_TITLE, REJECTION_MESSAGE,
};
