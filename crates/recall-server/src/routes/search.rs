//! Search endpoint.

use axum::{extract::State, Json};

use recall_core::{SearchRequest, SearchResponse};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Search captured memories.
/// POST /search
///
/// Body is the engine's [`SearchRequest`] contract: `{q, from?, to?, app?,
/// host?, k?}`. Malformed input yields a structured validation error, never
/// a 200 with empty results.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    let response = state
        .engine
        .search(&request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(response))
}
