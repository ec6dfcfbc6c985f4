//! Match contract — the inbound request and the normalized result shape
//! relayed to the caller.
//!
//! The scoring engine is inconsistent about optional fields: an array may be
//! present, absent, or explicitly `null`. Every sequence field here collapses
//! absent/null to empty, so consumers never null-check upstream payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inbound body for `POST /api/match`. Missing fields deserialize to empty
/// strings so validation can reject them with a 400 instead of a 422.
/// Serialized unchanged as the outbound engine payload — this layer is a
/// faithful relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_text: String,
}

impl MatchRequest {
    /// Both texts must be non-empty after trimming; checked before any
    /// network call.
    pub fn is_valid(&self) -> bool {
        !self.resume_text.trim().is_empty() && !self.job_text.trim().is_empty()
    }
}

/// Raw diagnostic scores from the engine. These are NOT guaranteed to be
/// numeric or within [0, 100] — clamping belongs to the formatter.
/// `semantic_score` is null when the engine skipped embeddings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDebug {
    #[serde(default)]
    pub tfidf_score: Value,
    #[serde(default)]
    pub skill_coverage: Value,
    #[serde(default)]
    pub semantic_score: Value,
}

/// One concrete improvement the engine suggests for the resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    /// Free-form label ("high", "medium", ...); compared case-insensitively
    /// by consumers, passed through verbatim here.
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_matters: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub how_to_fix: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub keyword: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletExample {
    pub keyword: String,
    pub bullet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopJobKeyword {
    pub term: String,
    pub weight: f64,
}

/// The normalized match report. Constructed fresh per request, immutable once
/// returned, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Overall match score in [0, 100].
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Present only when the engine returned it.
    #[serde(default)]
    pub debug: Option<EngineDebug>,
    /// Order preserved as sent; the engine does not guarantee uniqueness and
    /// we do not enforce it.
    #[serde(default, deserialize_with = "null_to_default")]
    pub matched_keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub missing_keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub action_items: Vec<ActionItem>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub resume_rewrite: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub bullet_examples: Vec<BulletExample>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub top_job_keywords: Vec<TopJobKeyword>,
}

/// Deserializes `null` as `T::default()` so upstream `"field": null` behaves
/// like an absent field.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
