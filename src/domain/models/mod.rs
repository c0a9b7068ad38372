mod chat_reply;
mod conversation;
mod message;
mod prompt;

pub use chat_reply::*;
pub use conversation::*;
pub use message::{Message, Role};
pub use prompt::*;
