use std::sync::Arc;

use crate::config::Config;
use crate::engine::ScoreEngine;

/// Shared application state injected into all route handlers via Axum
/// extractors. Read-only after startup; handlers share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Scoring engine seam. Production wires `HttpScoreEngine`; tests swap in
    /// fakes.
    pub engine: Arc<dyn ScoreEngine>,
    pub config: Config,
}
