pub mod ask_controller;
pub mod conversations_controller;

pub use ask_controller::AskController;
pub use conversations_controller::ConversationsController;
