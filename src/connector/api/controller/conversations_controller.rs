use anyhow::Result;

use crate::connector::terminal::{render_conversations, render_messages};

use super::super::Container;

pub struct ConversationsController<'a> {
    container: &'a Container,
}

impl<'a> ConversationsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self) -> Result<String> {
        let conversations = self.container.list_conversations_use_case().execute().await?;
        Ok(render_conversations(&conversations))
    }

    pub async fn history(&self, conversation_id: String) -> Result<String> {
        match self
            .container
            .list_conversations_use_case()
            .history(&conversation_id)
            .await
        {
            Ok(messages) => Ok(render_messages(&messages)),
            Err(e) if e.is_not_found() => Ok(format!("No conversation with id {conversation_id}.")),
            Err(e) => Err(e.into()),
        }
    }
}
