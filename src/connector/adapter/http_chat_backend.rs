use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::application::ChatBackend;
use crate::connector::api::http::dto::{ChatRequest, ChatResponse, NON_CODING_QUESTION};
use crate::domain::{ChatReply, DomainError};

/// [`ChatBackend`] that talks to a running `/chat` endpoint, so a terminal
/// session can front a remote server.
pub struct HttpChatBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpChatBackend {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Turns a `/chat` status and body back into the handler's result.
pub fn decode_chat_response(status: StatusCode, body: &str) -> Result<ChatReply, DomainError> {
    let parsed: ChatResponse = serde_json::from_str(body).unwrap_or_default();

    match status {
        StatusCode::OK => parsed
            .answer
            .map(ChatReply::answer)
            .ok_or_else(|| DomainError::provider("response is missing the answer field")),
        StatusCode::BAD_REQUEST
            if parsed.kind.as_deref() == Some("rejection")
                || parsed.error.as_deref() == Some(NON_CODING_QUESTION) =>
        {
            Ok(ChatReply::Rejected {
                message: parsed.message.unwrap_or_default(),
            })
        }
        StatusCode::BAD_REQUEST => Err(DomainError::invalid_input(
            parsed.message.unwrap_or_else(|| body.to_string()),
        )),
        StatusCode::TOO_MANY_REQUESTS => {
            Err(DomainError::rate_limited(parsed.error.unwrap_or_default()))
        }
        StatusCode::PAYMENT_REQUIRED => {
            Err(DomainError::payment_required(parsed.error.unwrap_or_default()))
        }
        other => Err(DomainError::internal(format!(
            "chat endpoint returned {other}: {}",
            parsed.message.or(parsed.error).unwrap_or_else(|| body.to_string())
        ))),
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn answer(
        &self,
        message: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply, DomainError> {
        let request = ChatRequest {
            message: message.to_string(),
            conversation_id: conversation_id.map(String::from),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("HttpChatBackend: request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::provider(format!("HttpChatBackend: failed to read body: {e}")))?;

        if !status.is_success() && status != StatusCode::BAD_REQUEST {
            warn!("HttpChatBackend: {} returned {status}", self.url);
        }
        debug!("HttpChatBackend: {status} ({} bytes)", body.len());

        decode_chat_response(status, &body)
    }
}
