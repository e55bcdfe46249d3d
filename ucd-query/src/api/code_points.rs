//! Code point and block lookups

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::debug;
use ucd_common::{Block, CodePoint};

use super::error::{ApiError, ApiResult};
use crate::AppState;

/// Code points belonging to one block
#[derive(Debug, Serialize)]
pub struct BlockCodePointsResponse {
    pub block: String,
    pub count: usize,
    pub code_points: Vec<CodePoint>,
}

/// GET /api/code-points/:cp
///
/// Accepts `0041`, `41`, `u+0041` or `U+0041`. Matches only records stored
/// with a single `cp`; members of a range record are not resolved.
pub async fn get_code_point(
    State(state): State<AppState>,
    Path(cp): Path<String>,
) -> ApiResult<Json<CodePoint>> {
    let key = canonical_cp(&cp)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid code point: {cp}")))?;
    debug!(cp = %key, "Code point lookup");

    state
        .store
        .code_point_by_cp(&key)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Code point {key}")))
}

/// GET /api/blocks/:name/code-points
///
/// An unknown block yields an empty list.
pub async fn get_block_code_points(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<BlockCodePointsResponse>> {
    let code_points = state.store.code_points_by_block(&name).await?;
    Ok(Json(BlockCodePointsResponse {
        block: name,
        count: code_points.len(),
        code_points,
    }))
}

/// GET /api/blocks
pub async fn list_blocks(State(state): State<AppState>) -> ApiResult<Json<Vec<Block>>> {
    Ok(Json(state.store.blocks().await?))
}

/// Stored form of a code value: upper-case hex, at least four digits
fn canonical_cp(raw: &str) -> Option<String> {
    let hex = raw
        .strip_prefix("U+")
        .or_else(|| raw.strip_prefix("u+"))
        .unwrap_or(raw);
    if hex.is_empty() || hex.len() > 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("{:0>4}", hex.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_cp() {
        assert_eq!(canonical_cp("0041").as_deref(), Some("0041"));
        assert_eq!(canonical_cp("41").as_deref(), Some("0041"));
        assert_eq!(canonical_cp("U+1f600").as_deref(), Some("1F600"));
        assert_eq!(canonical_cp("u+10FFFF").as_deref(), Some("10FFFF"));
    }

    #[test]
    fn test_canonical_cp_rejects_garbage() {
        assert!(canonical_cp("").is_none());
        assert!(canonical_cp("U+").is_none());
        assert!(canonical_cp("XYZ").is_none());
        assert!(canonical_cp("1234567").is_none());
    }
}
