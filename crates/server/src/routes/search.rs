//! Domain search API handler.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use domain_search_core::{SearchRequest, SearchResponse};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/search", post(search))
}

/// Search for candidate domains and their availability.
///
/// A missing or blank `q` answers `{ "domains": [] }`.
///
/// # Errors
///
/// Returns 400 for an unreadable body and 502 when a provider fails.
#[instrument(skip(state, body))]
pub async fn search(
    State(state): State<AppState>,
    body: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let team_id = request.team_id.as_deref().filter(|t| !t.trim().is_empty());

    let domains = state.search().search(request.query(), team_id).await?;
    tracing::debug!(q = %request.query(), count = domains.len(), "Search complete");

    Ok(Json(SearchResponse { domains }))
}
