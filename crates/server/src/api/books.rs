//! Book search and teaser handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use bookblurb_core::{SearchResult, SummaryResponse};
use serde::Deserialize;

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query. Missing and empty are both rejected with 422.
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeParams {
    /// Catalog volume id.
    #[serde(default)]
    pub id: String,
}

/// GET /search?q=<query>
///
/// Search the catalog and label each result with triggers and themes.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let results = state.discovery().search(&params.q).await?;
    Ok(Json(results))
}

/// GET /summarize?id=<id>
///
/// Return the cached teaser for a volume, generating it on first request.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummarizeParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state.discovery().summarize(&params.id).await?;
    Ok(Json(SummaryResponse { summary }))
}
