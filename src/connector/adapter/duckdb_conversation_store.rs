use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ConversationStore;
use crate::domain::{Conversation, DomainError, Message, Role};

pub struct DuckdbConversationStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbConversationStore {
    pub fn new(db_path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::storage(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                created_at BIGINT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL,
                position BIGINT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at BIGINT NOT NULL,
                is_coding_related BOOLEAN
            );

            CREATE INDEX IF NOT EXISTS idx_messages_conversation ON messages (conversation_id);
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize schema: {}", e)))?;

        debug!("DuckDB conversation schema initialized");
        Ok(())
    }

    fn conversation_from_row(row: &Row<'_>) -> duckdb::Result<Conversation> {
        Ok(Conversation::reconstitute(row.get(0)?, row.get(1)?, row.get(2)?))
    }

    fn message_from_row(row: &Row<'_>) -> duckdb::Result<Message> {
        let role: String = row.get(2)?;
        Ok(Message::reconstitute(
            row.get(0)?,
            row.get(1)?,
            // Only this adapter writes the column.
            Role::parse(&role).unwrap_or(Role::Assistant),
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }
}

#[async_trait]
impl ConversationStore for DuckdbConversationStore {
    async fn create_conversation(&self, title: &str) -> Result<Conversation, DomainError> {
        let conversation = Conversation::new(title);
        let conn = self.conn.lock().await;

        conn.execute(
            "INSERT INTO conversations (id, title, created_at) VALUES (?1, ?2, ?3)",
            params![conversation.id(), conversation.title(), conversation.created_at()],
        )
        .map_err(|e| DomainError::storage(format!("Failed to create conversation: {}", e)))?;

        debug!("Created conversation {}", conversation.id());
        Ok(conversation)
    }

    async fn find_conversation(&self, id: &str) -> Result<Option<Conversation>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, title, created_at FROM conversations WHERE id = ?1")
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        match stmt.query_row(params![id], Self::conversation_from_row) {
            Ok(conversation) => Ok(Some(conversation)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to query conversation: {}",
                e
            ))),
        }
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, title, created_at FROM conversations ORDER BY created_at DESC, id")
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], Self::conversation_from_row)
            .map_err(|e| DomainError::storage(format!("Failed to query conversations: {}", e)))?;

        let mut conversations = Vec::new();
        for row in rows {
            conversations
                .push(row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?);
        }
        Ok(conversations)
    }

    async fn insert_message(&self, message: &Message) -> Result<(), DomainError> {
        let conversation_id = message
            .conversation_id()
            .ok_or_else(|| DomainError::invalid_input("message has no conversation id"))?;

        let conn = self.conn.lock().await;

        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM conversations WHERE id = ?1",
                params![conversation_id],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to check conversation: {}", e)))?;
        if exists == 0 {
            return Err(DomainError::not_found(format!(
                "conversation {conversation_id}"
            )));
        }

        // The connection lock serializes writers, so the next position is stable.
        let position: i64 = conn
            .query_row(
                "SELECT COALESCE(MAX(position) + 1, 0) FROM messages WHERE conversation_id = ?1",
                params![conversation_id],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to compute position: {}", e)))?;

        conn.execute(
            r#"
            INSERT INTO messages (id, conversation_id, position, role, content, created_at, is_coding_related)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                message.id(),
                conversation_id,
                position,
                message.role().as_str(),
                message.content(),
                message.timestamp(),
                message.is_coding_related(),
            ],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save message: {}", e)))?;

        Ok(())
    }

    async fn list_messages(&self, conversation_id: &str) -> Result<Vec<Message>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, conversation_id, role, content, created_at, is_coding_related FROM messages WHERE conversation_id = ?1 ORDER BY position",
            )
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![conversation_id], Self::message_from_row)
            .map_err(|e| DomainError::storage(format!("Failed to query messages: {}", e)))?;

        let mut messages = Vec::new();
        for row in rows {
            messages
                .push(row.map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?);
        }
        Ok(messages)
    }
}
