use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is recovered at the boundary of the operation that raised it;
/// the profile store guarantees the in-memory record is unchanged when a
/// handler returns one of these.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document-to-text failure: unreadable PDF, wrong file type, empty text.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A content-generation call failed or returned schema-nonconforming data.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The interview scoring call failed.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// An operation was invoked before its required prior artifact exists
    /// (role selected with no résumé analyzed, interview started with no
    /// questions). Not transient — the caller must complete the missing step.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The durable session snapshot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(anyhow::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "Content generation failed. Try again.".to_string(),
                )
            }
            AppError::Evaluation(msg) => {
                tracing::error!("Evaluation error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EVALUATION_ERROR",
                    "Interview evaluation failed. Your answers are kept — resubmit the last one.".to_string(),
                )
            }
            AppError::Precondition(msg) => {
                (StatusCode::CONFLICT, "PRECONDITION_FAILED", msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Session storage failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
