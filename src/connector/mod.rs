//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion provider (OpenAI-compatible gateway over HTTP, scripted mock)
//! - Conversation storage (DuckDB, in-memory)
//! - HTTP endpoint and CLI controllers
//! - Terminal chat front end

pub mod adapter;
pub mod api;
pub mod terminal;

pub use adapter::*;
