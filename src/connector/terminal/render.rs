use crate::application::Notice;
use crate::domain::{Conversation, Message, Role};

const EMPTY_STATE: &str = "Ready to Code\nAsk any programming question and get expert answers instantly.";

/// Renders one message. Rejections get the error header from the typed
/// marking on the message, never from its text.
pub fn render_message(message: &Message) -> String {
    match message.role() {
        Role::User => format!("you> {}", message.content()),
        Role::Assistant if message.is_rejection() => {
            format!("[!] Error\n{}", message.content())
        }
        Role::Assistant => format!("assistant>\n{}", message.content()),
    }
}

pub fn render_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return EMPTY_STATE.to_string();
    }
    messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_notice(notice: &Notice) -> String {
    format!("** {}: {}", notice.title, notice.description)
}

pub fn render_conversations(conversations: &[Conversation]) -> String {
    if conversations.is_empty() {
        return "No conversations stored.".to_string();
    }

    let mut out = String::from("Conversations:\n");
    for conversation in conversations {
        out.push_str(&format!("\n  {} ({})", conversation.title(), conversation.id()));
    }
    out
}
