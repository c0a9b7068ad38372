//! Line-oriented terminal front end for a [`crate::ChatSession`].

mod chat_repl;
mod render;

pub use chat_repl::*;
pub use render::*;
