use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::{ChatSession, SubmitOutcome};

use super::render::{render_message, render_notice};

const BANNER: &str = "Coder's Chatbox: this chat only accepts coding-related questions. Type /quit to exit.";

/// Drives `session` from line input until EOF or `/quit`.
pub async fn run_chat<R, W>(session: &mut ChatSession, input: R, output: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    session.open().await;
    write_line(output, BANNER).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        session.set_input(line);
        let Some(pending) = session.begin() else {
            continue;
        };

        write_line(output, "Processing your question...").await?;
        let outcome = session.complete(pending).await;

        match outcome {
            SubmitOutcome::Answered => write_last_message(session, output).await?,
            SubmitOutcome::Rejected { notice } => {
                write_last_message(session, output).await?;
                write_line(output, &render_notice(&notice)).await?;
            }
            SubmitOutcome::Failed { notice } => {
                write_line(output, &render_notice(&notice)).await?;
            }
            SubmitOutcome::Ignored => {}
        }
    }

    output.flush().await?;
    Ok(())
}

async fn write_last_message<W: AsyncWrite + Unpin>(session: &ChatSession, output: &mut W) -> Result<()> {
    if let Some(message) = session.messages().last() {
        write_line(output, &render_message(message)).await?;
    }
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::BufReader;

    use super::*;
    use crate::application::AnswerQuestionUseCase;
    use crate::connector::adapter::{InMemoryConversationStore, MockCompletionClient};
    use crate::domain::DomainError;

    async fn run(client: MockCompletionClient, script: &str) -> (String, ChatSession) {
        let backend = Arc::new(AnswerQuestionUseCase::with_client(Arc::new(client), "m"));
        let mut session = ChatSession::new(backend, Arc::new(InMemoryConversationStore::new()));
        let mut out = Vec::new();

        run_chat(&mut session, BufReader::new(script.as_bytes()), &mut out)
            .await
            .unwrap();

        (String::from_utf8(out).unwrap(), session)
    }

    #[tokio::test]
    async fn answers_and_rejections_are_rendered() {
        let client = MockCompletionClient::new()
            .with_reply("YES")
            .with_reply("Use iter().rev()")
            .with_reply("NO");

        let (out, session) = run(client, "How do I reverse a Vec?\nWhat's the weather today?\n").await;

        assert!(out.contains("assistant>\nUse iter().rev()"));
        assert!(out.contains("[!] Error"));
        assert!(out.contains("** Non-Coding Question Detected"));
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn blank_lines_and_quit_stop_without_calls() {
        let client = MockCompletionClient::new();
        let (out, session) = run(client, "\n   \n/quit\nnever sent\n").await;

        assert!(!out.contains("Processing"));
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn failures_show_generic_notice() {
        let client = MockCompletionClient::new().with_error(DomainError::rate_limited("429"));
        let (out, session) = run(client, "What is Rust?\n").await;

        assert!(out.contains("** Error: Failed to get response. Please try again."));
        assert_eq!(session.messages().len(), 1);
    }
}
