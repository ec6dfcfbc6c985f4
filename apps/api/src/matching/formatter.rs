#![allow(dead_code)]

//! Presentation formatter — pure helpers deriving display values from a
//! `MatchResult`. No I/O, no state; the rendering layer (and our success-path
//! diagnostics) consume these.

use serde::Serialize;
use serde_json::Value;

use super::models::EngineDebug;

/// Badge tier for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBadge {
    pub label: &'static str,
    pub tier: BadgeTier,
}

/// Clamps an engine-supplied value into [0, 100] for display as a percent.
///
/// The engine does not guarantee numeric, in-range values, and older builds
/// emitted numbers as strings; anything non-numeric (including NaN and
/// infinities) becomes 0.
pub fn clamp_percent(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() => n.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Clamped semantic similarity percent, or `None` when the engine did not
/// compute embeddings for this request (absent or null `semantic_score`).
pub fn semantic_percent(debug: &Option<EngineDebug>) -> Option<f64> {
    let score = &debug.as_ref()?.semantic_score;
    if score.is_null() {
        return None;
    }
    Some(clamp_percent(score))
}

/// Tier thresholds are inclusive on the lower bound: 75 is strong, 50 is
/// moderate, everything below 50 is weak.
pub fn score_badge(score: f64) -> ScoreBadge {
    if score >= 75.0 {
        ScoreBadge {
            label: "Strong Match",
            tier: BadgeTier::Strong,
        }
    } else if score >= 50.0 {
        ScoreBadge {
            label: "Moderate Match",
            tier: BadgeTier::Moderate,
        }
    } else {
        ScoreBadge {
            label: "Weak Match",
            tier: BadgeTier::Weak,
        }
    }
}

/// Display-only description of the score formula. Deliberately does not
/// mention the optional semantic component — the engine's disclosure has
/// never accounted for it, and redefining the weighting is not this layer's
/// call.
pub fn weighted_score_caption() -> &'static str {
    "70% text similarity + 30% skill coverage"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clamp_percent_passes_in_range_values() {
        assert_eq!(clamp_percent(&json!(42.5)), 42.5);
        assert_eq!(clamp_percent(&json!(0)), 0.0);
        assert_eq!(clamp_percent(&json!(100)), 100.0);
    }

    #[test]
    fn test_clamp_percent_clamps_out_of_range() {
        assert_eq!(clamp_percent(&json!(150)), 100.0);
        assert_eq!(clamp_percent(&json!(-5)), 0.0);
    }

    #[test]
    fn test_clamp_percent_accepts_numeric_strings() {
        assert_eq!(clamp_percent(&json!("61.2")), 61.2);
        assert_eq!(clamp_percent(&json!(" 120 ")), 100.0);
    }

    #[test]
    fn test_clamp_percent_rejects_non_numeric() {
        assert_eq!(clamp_percent(&json!("abc")), 0.0);
        assert_eq!(clamp_percent(&json!(null)), 0.0);
        assert_eq!(clamp_percent(&json!([1, 2])), 0.0);
        assert_eq!(clamp_percent(&json!("NaN")), 0.0);
    }

    #[test]
    fn test_clamp_percent_is_idempotent() {
        for v in [json!(-5), json!(0), json!(49.9), json!(100), json!(150), json!("88")] {
            let once = clamp_percent(&v);
            assert_eq!(clamp_percent(&json!(once)), once, "value {v}");
        }
    }

    #[test]
    fn test_score_badge_thresholds() {
        assert_eq!(score_badge(75.0).tier, BadgeTier::Strong);
        assert_eq!(score_badge(74.9).tier, BadgeTier::Moderate);
        assert_eq!(score_badge(50.0).tier, BadgeTier::Moderate);
        assert_eq!(score_badge(49.0).tier, BadgeTier::Weak);
        assert_eq!(score_badge(100.0).tier, BadgeTier::Strong);
        assert_eq!(score_badge(0.0).tier, BadgeTier::Weak);
    }

    #[test]
    fn test_score_badge_labels() {
        assert_eq!(score_badge(90.0).label, "Strong Match");
        assert_eq!(score_badge(60.0).label, "Moderate Match");
        assert_eq!(score_badge(10.0).label, "Weak Match");
    }

    #[test]
    fn test_badge_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(BadgeTier::Strong).unwrap(),
            json!("strong")
        );
    }

    #[test]
    fn test_semantic_percent_none_when_engine_skipped_embeddings() {
        assert_eq!(semantic_percent(&None), None);

        let debug = EngineDebug {
            tfidf_score: json!(61.2),
            skill_coverage: json!(50.0),
            semantic_score: json!(null),
        };
        assert_eq!(semantic_percent(&Some(debug)), None);
    }

    #[test]
    fn test_semantic_percent_clamps_when_present() {
        let debug = EngineDebug {
            tfidf_score: json!(61.2),
            skill_coverage: json!(50.0),
            semantic_score: json!(120.0),
        };
        assert_eq!(semantic_percent(&Some(debug)), Some(100.0));
    }

    #[test]
    fn test_weighted_score_caption_is_fixed() {
        assert_eq!(
            weighted_score_caption(),
            "70% text similarity + 30% skill coverage"
        );
    }
}
