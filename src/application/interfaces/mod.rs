mod chat_backend;
mod completion_client;
mod conversation_store;

pub use chat_backend::*;
pub use completion_client::*;
pub use conversation_store::*;
