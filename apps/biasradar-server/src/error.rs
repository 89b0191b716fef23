//! Error types for the BiasRadar server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bias_engine::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Text too long: {len} characters (maximum {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("AI service not configured")]
    AiNotConfigured,

    #[error("AI service error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::TextTooLong { max, .. } => (
                StatusCode::BAD_REQUEST,
                "TEXT_TOO_LONG",
                format!("Text too long. Maximum {} characters.", max),
            ),
            ServerError::AiNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI_NOT_CONFIGURED",
                "AI service not configured".to_string(),
            ),
            ServerError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "AI_ERROR", msg.clone()),
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::NotConfigured => ServerError::AiNotConfigured,
            other => ServerError::Upstream(other.to_string()),
        }
    }
}
