//! Scoring engine client — the single point of entry for all calls to the
//! downstream AI scoring service.
//!
//! The trait exists so the orchestrator can be exercised against fakes; the
//! real implementation is one idempotent `POST {base}/match` per attempt.
//! Retry timing lives in `crate::retry`, not here.

use std::error::Error as _;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::matching::models::MatchRequest;

/// Per-attempt network timeout. The retry classifier treats a timeout as
/// retryable, so a slow cold start burns one attempt rather than the call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure of a single scoring attempt, with the original status/code kept
/// intact for classification and diagnostics.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scoring engine returned status {status}")]
    Status { status: u16, body: String },

    #[error("scoring engine transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl EngineError {
    /// Retryable iff the status is 502/503/504 or the transport error is a
    /// timeout, connection reset, or connection abort. Everything else
    /// (other statuses, DNS failure, refused connections, decode errors)
    /// aborts immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Status { status, .. } => matches!(status, 502 | 503 | 504),
            EngineError::Transport(err) => {
                if err.is_timeout() {
                    return true;
                }
                matches!(
                    io_error_kind(err),
                    Some(
                        io::ErrorKind::ConnectionReset
                            | io::ErrorKind::ConnectionAborted
                            | io::ErrorKind::TimedOut
                    )
                )
            }
        }
    }
}

/// Short diagnostic code for a transport failure, surfaced to the caller in
/// the gateway error body.
pub fn transport_code(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "timeout".to_string();
    }
    if let Some(kind) = io_error_kind(err) {
        return format!("{kind:?}");
    }
    if err.is_connect() {
        return "connect".to_string();
    }
    err.to_string()
}

/// reqwest folds every connection failure into one opaque error, so the
/// classifier walks the source chain for the underlying io error kind.
fn io_error_kind(err: &reqwest::Error) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = cause.source();
    }
    None
}

/// One scoring attempt against the engine. Implementations must not retry
/// internally; the orchestrator owns the retry loop.
#[async_trait]
pub trait ScoreEngine: Send + Sync {
    /// Returns the raw response body on a success status. Interpreting the
    /// body (empty, malformed, valid result) is the orchestrator's job.
    async fn score(&self, base_url: &str, request: &MatchRequest) -> Result<String, EngineError>;
}

/// The production engine client. One shared reqwest client with a
/// per-attempt timeout; no state beyond the connection pool.
#[derive(Clone)]
pub struct HttpScoreEngine {
    client: Client,
}

impl HttpScoreEngine {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
        })
    }
}

#[async_trait]
impl ScoreEngine for HttpScoreEngine {
    async fn score(&self, base_url: &str, request: &MatchRequest) -> Result<String, EngineError> {
        let url = format!("{base_url}/match");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "scoring engine responded");
        Ok(body)
    }
}
