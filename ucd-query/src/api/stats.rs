//! Aggregate statistics and metadata

use axum::{extract::State, Json};
use ucd_common::db::CharacterBreakdown;
use ucd_common::{DatabaseStats, UcdMetadata};

use super::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<DatabaseStats>> {
    Ok(Json(state.store.compute_stats().await?))
}

/// GET /api/stats/breakdown
pub async fn get_breakdown(State(state): State<AppState>) -> ApiResult<Json<CharacterBreakdown>> {
    Ok(Json(state.store.character_breakdown().await?))
}

/// GET /api/metadata
///
/// 404 until an import has saved its metadata document.
pub async fn get_metadata(State(state): State<AppState>) -> ApiResult<Json<UcdMetadata>> {
    state
        .store
        .current_metadata()
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No UCD metadata; run ucd-import first".to_string()))
}
