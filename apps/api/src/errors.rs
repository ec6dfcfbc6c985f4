use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type — one variant per failure kind so callers
/// dispatch on the kind, never on message strings.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller input failed validation. Never retried.
    #[error("resume_text and job_text are required")]
    InvalidRequest,

    /// The downstream scoring engine address is not configured.
    #[error("AI_SERVICE_URL is not set")]
    Misconfigured,

    /// Transport-level failure after exhausting retries (or immediately for a
    /// non-retryable transport error); no response was received at all.
    #[error("AI service is unreachable: {code}")]
    UpstreamUnreachable { code: String },

    /// The engine responded with an error status after exhausting retries.
    #[error("AI service failed with status {status}")]
    UpstreamUnavailable { status: u16, detail: String },

    /// The engine returned a success status but a null/empty body.
    #[error("AI service returned null")]
    UpstreamEmpty,

    /// The engine body does not conform to the match result shape. The raw
    /// payload is kept for diagnostics.
    #[error("AI service returned an unexpected payload")]
    UpstreamMalformed { payload: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            AppError::Misconfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": self.to_string(),
                    "hint": "Set AI_SERVICE_URL to the scoring engine base URL (e.g. http://127.0.0.1:8000)",
                }),
            ),
            AppError::UpstreamUnreachable { code } => {
                tracing::error!("upstream unreachable: {code}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "AI service is unreachable",
                        "detail": code,
                        "hint": "Check that the ai-service is running and reachable, then try again",
                    }),
                )
            }
            AppError::UpstreamUnavailable { status, detail } => {
                tracing::error!("upstream failed with status {status}: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "AI service failed",
                        "status": status,
                        "detail": detail,
                        "hint": "The scoring engine rejected the call; check its logs before retrying",
                    }),
                )
            }
            AppError::UpstreamEmpty => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "AI service returned null",
                    "hint": "Check ai-service is running the correct build and /match returns JSON",
                }),
            ),
            AppError::UpstreamMalformed { payload } => {
                tracing::error!("upstream payload malformed: {payload}");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "AI service returned an unexpected payload",
                        "detail": payload,
                        "hint": "The scoring engine response did not match the expected result shape",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
