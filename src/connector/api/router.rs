use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ConversationsController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    conversations_controller: ConversationsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            conversations_controller: ConversationsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { question, remote } => self.ask_controller.ask(question, remote).await,
            Commands::Conversations => self.conversations_controller.list().await,
            Commands::History { conversation_id } => {
                self.conversations_controller.history(conversation_id).await
            }
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
            Commands::Chat { .. } => unreachable!("chat command is handled separately in main"),
        }
    }
}
