mod answer_question;
mod chat_session;
mod classify_question;
mod generate_answer;
mod list_conversations;

pub use answer_question::*;
pub use chat_session::*;
pub use classify_question::*;
pub use generate_answer::*;
pub use list_conversations::*;
