use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::screening::orchestrator::ScreeningError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Template error: {0}")]
    Template(String),
}

impl From<ScreeningError> for AppError {
    fn from(err: ScreeningError) -> Self {
        match err {
            ScreeningError::EmptyApplication => {
                AppError::Validation("application cannot be empty".to_string())
            }
            ScreeningError::Completion(e) => AppError::Llm(e.to_string()),
            ScreeningError::State(e) => AppError::State(e.to_string()),
            ScreeningError::Template(e) => AppError::Template(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The completion service failed".to_string(),
                )
            }
            AppError::State(msg) => {
                tracing::error!("State error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STATE_ERROR",
                    "The screening run reached an invalid state".to_string(),
                )
            }
            AppError::Template(msg) => {
                tracing::error!("Template error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_ERROR",
                    "A prompt template is malformed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
