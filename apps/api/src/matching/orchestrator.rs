//! Match orchestrator — the only component that talks to the scoring engine
//! on behalf of a user request.
//!
//! validate → retry-wrapped engine call → interpret body/failure. Holds no
//! state across calls; every invocation builds its own retry loop.

use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::{transport_code, EngineError, ScoreEngine};
use crate::errors::AppError;
use crate::retry::{retry_with_backoff, RetryPolicy};

use super::formatter::{clamp_percent, score_badge, semantic_percent};
use super::models::{MatchRequest, MatchResult};

/// Upper bound on the raw-payload excerpt carried in diagnostics, so a
/// misbehaving upstream cannot balloon error bodies and logs.
const DETAIL_MAX_CHARS: usize = 2048;

/// Runs one match request end to end. Repeating the same request is safe to
/// retry from the caller's side — scoring is read-like — but no deduplication
/// happens here; each call is independent.
pub async fn handle_match(
    engine: &dyn ScoreEngine,
    config: &Config,
    request: &MatchRequest,
) -> Result<MatchResult, AppError> {
    if !request.is_valid() {
        return Err(AppError::InvalidRequest);
    }

    let base_url = config
        .ai_service_url
        .as_deref()
        .ok_or(AppError::Misconfigured)?;

    let body = retry_with_backoff(RetryPolicy::default(), EngineError::is_retryable, || {
        engine.score(base_url, request)
    })
    .await
    .map_err(|err| match err {
        EngineError::Status { status, body } => AppError::UpstreamUnavailable {
            status,
            detail: truncate_detail(&body),
        },
        EngineError::Transport(e) => AppError::UpstreamUnreachable {
            code: transport_code(&e),
        },
    })?;

    let result = interpret_body(&body)?;

    let badge = score_badge(result.score);
    info!(score = result.score, tier = ?badge.tier, "match scored");
    if let Some(d) = &result.debug {
        debug!(
            tfidf_pct = clamp_percent(&d.tfidf_score),
            coverage_pct = clamp_percent(&d.skill_coverage),
            semantic_pct = ?semantic_percent(&result.debug),
            "engine debug scores"
        );
    }

    Ok(result)
}

/// Classifies a success-status body: empty/null → `UpstreamEmpty`, the
/// expected result shape → normalized `MatchResult`, anything else →
/// `UpstreamMalformed` with the raw payload preserved.
fn interpret_body(raw: &str) -> Result<MatchResult, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::UpstreamEmpty);
    }

    let value: Value = serde_json::from_str(raw).map_err(|_| AppError::UpstreamMalformed {
        payload: truncate_detail(raw),
    })?;

    if value.is_null() {
        return Err(AppError::UpstreamEmpty);
    }

    serde_json::from_value(value).map_err(|_| AppError::UpstreamMalformed {
        payload: truncate_detail(raw),
    })
}

fn truncate_detail(raw: &str) -> String {
    raw.chars().take(DETAIL_MAX_CHARS).collect()
}
