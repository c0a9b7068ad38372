//! JSON bodies of the `/chat` endpoint, shared by the server and [`crate::HttpChatBackend`].

use serde::{Deserialize, Serialize};

pub const NON_CODING_QUESTION: &str = "non_coding_question";
pub const INVALID_REQUEST: &str = "invalid_request";
pub const INTERNAL_ERROR: &str = "internal_error";
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const PAYMENT_REQUIRED_MESSAGE: &str = "Payment required. Please add credits to your workspace.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "conversationId", default)]
    pub conversation_id: Option<String>,
}

/// `200` body.
#[derive(Debug, Serialize)]
pub struct AnswerBody<'a> {
    pub kind: &'static str,
    pub answer: &'a str,
    #[serde(rename = "isCodingRelated")]
    pub is_coding_related: bool,
}

/// `400` body for a question that is not about programming.
#[derive(Debug, Serialize)]
pub struct RejectionBody<'a> {
    pub kind: &'static str,
    pub error: &'static str,
    pub message: &'a str,
    #[serde(rename = "isCodingRelated")]
    pub is_coding_related: bool,
}

/// Body of every failure response; `message` is omitted for 429 and 402.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Permissive view of any `/chat` response, used when decoding on the client side.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
