use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::domain::ChatReply;

use super::dto::{AnswerBody, ChatRequest, RejectionBody, NON_CODING_QUESTION};
use super::error::ApiError;
use super::AppState;

/// `POST /chat`: classify the question, then answer it or refuse it.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    info!("Received message ({} chars)", request.message.len());

    let reply = state
        .backend
        .answer(&request.message, request.conversation_id.as_deref())
        .await?;

    Ok(reply_response(&reply))
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn reply_response(reply: &ChatReply) -> Response {
    match reply {
        ChatReply::Answer { text } => (
            StatusCode::OK,
            Json(AnswerBody {
                kind: "answer",
                answer: text,
                is_coding_related: true,
            }),
        )
            .into_response(),
        ChatReply::Rejected { message } => (
            StatusCode::BAD_REQUEST,
            Json(RejectionBody {
                kind: "rejection",
                error: NON_CODING_QUESTION,
                message,
                is_coding_related: false,
            }),
        )
            .into_response(),
    }
}
