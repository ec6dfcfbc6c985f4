use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness only — succeeds whenever the process is up.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "ok": true,
        "service": "match-api",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
