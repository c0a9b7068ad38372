use anyhow::{bail, Result};

use crate::application::SubmitOutcome;
use crate::connector::terminal::{render_message, render_notice};
use crate::domain::Message;

use super::super::Container;

/// One-shot question through a fresh, persisted session.
pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(&self, question: String, remote: Option<String>) -> Result<String> {
        let mut session = self.container.chat_session(remote.as_deref());
        session.open().await;
        session.set_input(question);

        match session.submit().await {
            SubmitOutcome::Ignored => bail!("question must not be empty"),
            SubmitOutcome::Failed { notice } => bail!(render_notice(&notice)),
            SubmitOutcome::Answered => Ok(self.last_message(session.messages())),
            SubmitOutcome::Rejected { notice } => Ok(format!(
                "{}\n\n{}",
                self.last_message(session.messages()),
                render_notice(&notice)
            )),
        }
    }

    fn last_message(&self, messages: &[Message]) -> String {
        messages.last().map(render_message).unwrap_or_default()
    }
}
