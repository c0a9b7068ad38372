mod duckdb_conversation_store;
mod gateway_completion_client;
mod http_chat_backend;
mod in_memory_conversation_store;
mod mock_completion_client;

pub use duckdb_conversation_store::*;
pub use gateway_completion_client::*;
pub use http_chat_backend::*;
pub use in_memory_conversation_store::*;
pub use mock_completion_client::*;
