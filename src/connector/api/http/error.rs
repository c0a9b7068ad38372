use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::domain::DomainError;

use super::dto::{
    ErrorBody, INTERNAL_ERROR, INVALID_REQUEST, PAYMENT_REQUIRED_MESSAGE, RATE_LIMIT_MESSAGE,
};

/// Failure responses of the chat endpoint.
#[derive(Debug)]
pub enum ApiError {
    InvalidRequest(String),
    RateLimited,
    PaymentRequired,
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::InvalidRequest(msg) => ErrorBody {
                error: INVALID_REQUEST.to_string(),
                message: Some(msg),
            },
            ApiError::RateLimited => ErrorBody {
                error: RATE_LIMIT_MESSAGE.to_string(),
                message: None,
            },
            ApiError::PaymentRequired => ErrorBody {
                error: PAYMENT_REQUIRED_MESSAGE.to_string(),
                message: None,
            },
            ApiError::Internal(msg) => {
                error!("Error in chat handler: {msg}");
                ErrorBody {
                    error: INTERNAL_ERROR.to_string(),
                    message: Some(msg),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::RateLimited(_) => ApiError::RateLimited,
            DomainError::PaymentRequired(_) => ApiError::PaymentRequired,
            DomainError::InvalidInput(msg) => ApiError::InvalidRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::InvalidRequest(e.body_text())
    }
}
