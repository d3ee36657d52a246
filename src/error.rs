//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::predict::PredictError;

pub type AppResult<T> = Result<T, AppError>;

/// Submission-path errors. Every kind is recoverable by resubmitting;
/// none leaves partially overwritten display state behind.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A form field failed type coercion or domain checks before send
    #[error("validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Field name outside the registry
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// Transport failure, timeout, or non-2xx from the prediction service
    #[error("network error: {0}")]
    Network(String),

    /// Response body missing required fields or out of range
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A submission is already in flight; resubmission is serialized
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::UnknownField(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Network(msg) => {
                tracing::error!("Prediction service error: {}", msg);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed prediction response: {}", msg);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            AppError::SubmissionInProgress => (StatusCode::CONFLICT, self.to_string()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Network(msg) => AppError::Network(msg),
            PredictError::ServerError(code) => AppError::Network(format!("server returned {}", code)),
            PredictError::Malformed(msg) => AppError::MalformedResponse(msg),
        }
    }
}
