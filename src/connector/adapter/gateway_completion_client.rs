use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const API_KEY_VAR: &str = "AI_GATEWAY_API_KEY";

/// Settings for the outbound completion provider, built once at startup.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Bearer credential. `None` is allowed at startup; every request then
    /// fails with a configuration error.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Bound on a single outbound call, including reading the body.
    pub timeout: Duration,
    /// Extra attempts after a transport failure (connect error or timeout).
    /// HTTP error statuses are never retried.
    pub max_retries: u32,
}

impl ProviderConfig {
    /// Reads the environment:
    ///
    /// | Variable                  | Default                          |
    /// |---------------------------|----------------------------------|
    /// | `AI_GATEWAY_API_KEY`      | none                             |
    /// | `AI_GATEWAY_BASE_URL`     | `https://ai.gateway.lovable.dev` |
    /// | `AI_GATEWAY_MODEL`        | `google/gemini-2.5-flash`        |
    /// | `AI_GATEWAY_TIMEOUT_SECS` | `60`                             |
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty());
        let base_url =
            std::env::var("AI_GATEWAY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("AI_GATEWAY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var("AI_GATEWAY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
            max_retries: 1,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 1,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible `chat/completions` gateway.
pub struct GatewayCompletionClient {
    client: reqwest::Client,
    api_key: Option<String>,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
    max_retries: u32,
}

impl GatewayCompletionClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let url = format!("{}{}", config.base_url.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            url,
            max_retries: config.max_retries,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One request including the body read, retried on transport failures.
    async fn send(
        &self,
        api_key: &str,
        payload: &ApiRequest<'_>,
    ) -> Result<(StatusCode, String), DomainError> {
        let mut attempt = 0;
        loop {
            match self.send_once(api_key, payload).await {
                Ok(reply) => return Ok(reply),
                Err(e) if (e.is_connect() || e.is_timeout()) && attempt < self.max_retries => {
                    attempt += 1;
                    warn!("GatewayCompletionClient: transient failure ({e}), retry {attempt}");
                }
                Err(e) => {
                    return Err(DomainError::provider(format!(
                        "GatewayCompletionClient: request failed: {e}"
                    )))
                }
            }
        }
    }

    async fn send_once(
        &self,
        api_key: &str,
        payload: &ApiRequest<'_>,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Maps a non-success provider status to the error taxonomy.
pub fn classify_status(status: StatusCode, body: &str) -> DomainError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => DomainError::rate_limited(body.to_string()),
        StatusCode::PAYMENT_REQUIRED => DomainError::payment_required(body.to_string()),
        other => DomainError::provider(format!("API returned {other}: {body}")),
    }
}

/// Pulls `choices[0].message.content` out of a response body.
///
/// A body that is not JSON or has no choices is a provider error; a choice
/// whose content is null yields an empty string.
pub fn extract_content(body: &str) -> Result<String, DomainError> {
    let parsed: ApiResponse = serde_json::from_str(body)
        .map_err(|e| DomainError::provider(format!("failed to parse response: {e}")))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::provider("response contained no choices"))?;

    Ok(choice.message.and_then(|m| m.content).unwrap_or_default())
}

#[async_trait]
impl CompletionClient for GatewayCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::configuration(format!("{API_KEY_VAR} is not configured")))?;

        let payload = ApiRequest {
            model: request.model(),
            messages: request
                .segments()
                .iter()
                .map(|s| ApiMessage {
                    role: s.role.as_str(),
                    content: &s.content,
                })
                .collect(),
        };

        let (status, body) = self.send(api_key, &payload).await?;

        if !status.is_success() {
            warn!("GatewayCompletionClient: API returned {status}: {body}");
            return Err(classify_status(status, &body));
        }

        debug!("GatewayCompletionClient: {} bytes from {}", body.len(), self.url);
        extract_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PromptSegment;

    #[test]
    fn classify_status_maps_quota_and_billing() {
        assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, "").is_rate_limited());
        assert!(classify_status(StatusCode::PAYMENT_REQUIRED, "").is_payment_required());
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            DomainError::Provider(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key"),
            DomainError::Provider(_)
        ));
    }

    #[test]
    fn extract_content_reads_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"YES"}},{"message":{"content":"NO"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "YES");
    }

    #[test]
    fn extract_content_null_content_is_empty() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "");
    }

    #[test]
    fn extract_content_rejects_malformed_bodies() {
        assert!(matches!(extract_content("<html>"), Err(DomainError::Provider(_))));
        assert!(matches!(extract_content(r#"{"choices":[]}"#), Err(DomainError::Provider(_))));
        assert!(matches!(extract_content("{}"), Err(DomainError::Provider(_))));
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        let config = ProviderConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..ProviderConfig::default()
        };
        let client = GatewayCompletionClient::new(&config);
        assert_eq!(client.url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ProviderConfig {
            api_key: Some("sk-secret".to_string()),
            ..ProviderConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let config = ProviderConfig {
            api_key: None,
            // Unroutable; reaching the network would surface a provider error instead.
            base_url: "http://127.0.0.1:9".to_string(),
            ..ProviderConfig::default()
        };
        let client = GatewayCompletionClient::new(&config);
        let request = CompletionRequest::new("m").with_segment(PromptSegment::user("q"));

        let err = client.complete(&request).await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
