use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Config(_) => (StatusCode::SERVICE_UNAVAILABLE, "CONFIG_ERROR"),
            AppError::Provider(_) => (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(msg) | AppError::Config(msg) => msg.clone(),
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                e.to_string()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("x".into()).status_and_code(),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );
        assert_eq!(
            AppError::Config("x".into()).status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "CONFIG_ERROR")
        );
        assert_eq!(
            AppError::Provider(LlmError::MalformedResponse("x".into())).status_and_code(),
            (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR")
        );
    }

    #[test]
    fn test_provider_error_message_is_human_readable() {
        let err = AppError::Provider(LlmError::Api {
            status: 429,
            message: "Rate limit reached".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Provider error: API error (status 429): Rate limit reached"
        );
    }
}
