use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;

use super::models::{MatchRequest, MatchResult};
use super::orchestrator;

/// POST /api/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let result = orchestrator::handle_match(state.engine.as_ref(), &state.config, &req).await?;
    Ok(Json(result))
}
