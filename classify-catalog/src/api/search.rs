//! Title search against the classification service

use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::deadline::lookup_timeout;
use crate::api::params::RequestParams;
use crate::classify::SearchResult;
use crate::{ApiResult, AppState};

/// Search parameters (query string and/or urlencoded body)
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Title query; an empty query is passed through unchanged
    #[serde(default)]
    pub search: String,
}

/// GET|POST /search?search=TITLE
///
/// Returns the matching works as a JSON array.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestParams(params): RequestParams<SearchParams>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let timeout = lookup_timeout(&headers, state.lookup_timeout);
    let results = state.catalog.search(&params.search, timeout).await?;

    Ok(Json(results))
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(search).post(search))
}
