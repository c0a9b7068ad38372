use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    AnswerQuestionUseCase, ChatBackend, ChatSession, CompletionClient, ConversationStore,
    ListConversationsUseCase,
};
use crate::connector::adapter::{
    DuckdbConversationStore, GatewayCompletionClient, HttpChatBackend, InMemoryConversationStore,
    ProviderConfig,
};

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep conversations in memory instead of the DuckDB file.
    pub memory_storage: bool,
    pub provider: ProviderConfig,
}

/// Wires adapters into use cases. Built once per process from an explicit
/// [`ContainerConfig`]; nothing downstream reads the environment.
pub struct Container {
    completion_client: Arc<dyn CompletionClient>,
    store: Arc<dyn ConversationStore>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        if config.provider.api_key.is_none() {
            tracing::warn!(
                "AI_GATEWAY_API_KEY is not set; chat requests will fail with a configuration error"
            );
        }

        let completion_client: Arc<dyn CompletionClient> =
            Arc::new(GatewayCompletionClient::new(&config.provider));
        debug!("Completion provider: {:?}", config.provider);

        let store: Arc<dyn ConversationStore> = if config.memory_storage {
            debug!("Using in-memory conversation storage");
            Arc::new(InMemoryConversationStore::new())
        } else {
            std::fs::create_dir_all(&config.data_dir)?;
            let db_path = PathBuf::from(&config.data_dir).join("chatbox.duckdb");
            match DuckdbConversationStore::new(&db_path) {
                Ok(duckdb) => {
                    debug!("Using DuckDB conversation storage at {:?}", db_path);
                    Arc::new(duckdb)
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to initialize DuckDB ({}): {}. Falling back to in-memory storage.",
                        db_path.display(),
                        e
                    );
                    Arc::new(InMemoryConversationStore::new())
                }
            }
        };

        Ok(Self::with_components(config, completion_client, store))
    }

    /// Assemble from already-built adapters.
    pub fn with_components(
        config: ContainerConfig,
        completion_client: Arc<dyn CompletionClient>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            completion_client,
            store,
            config,
        }
    }

    pub fn answer_use_case(&self) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::with_client(self.completion_client.clone(), &self.config.provider.model)
    }

    /// In-process handler, or a remote `/chat` endpoint when `remote` is set.
    pub fn chat_backend(&self, remote: Option<&str>) -> Arc<dyn ChatBackend> {
        match remote {
            Some(url) => {
                debug!("Using remote chat endpoint at {}", url);
                Arc::new(HttpChatBackend::new(url, self.config.provider.timeout))
            }
            None => Arc::new(self.answer_use_case()),
        }
    }

    pub fn chat_session(&self, remote: Option<&str>) -> ChatSession {
        ChatSession::new(self.chat_backend(remote), self.store.clone())
    }

    pub fn list_conversations_use_case(&self) -> ListConversationsUseCase {
        ListConversationsUseCase::new(self.store.clone())
    }

    pub fn model(&self) -> &str {
        &self.config.provider.model
    }
}
