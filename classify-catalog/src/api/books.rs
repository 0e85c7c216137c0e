//! Catalog page and book management endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::deadline::lookup_timeout;
use crate::api::params::RequestParams;
use crate::db::Book;
use crate::render::render_catalog;
use crate::{ApiError, ApiResult, AppState};

/// Catalog page parameters
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    /// Optional name to greet
    pub name: Option<String>,
}

/// Add parameters
#[derive(Debug, Deserialize)]
pub struct AddParams {
    /// External work identifier
    #[serde(default)]
    pub id: String,
}

/// Delete parameters
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// Primary key, as sent by the client
    #[serde(default)]
    pub pk: String,
}

/// GET /
///
/// HTML page listing every stored book
pub async fn index(
    State(state): State<AppState>,
    RequestParams(params): RequestParams<IndexParams>,
) -> ApiResult<Html<String>> {
    let books = state.catalog.list_page().await?;
    let html = render_catalog(&books, params.name.as_deref())?;

    Ok(Html(html))
}

/// GET /books
///
/// Every stored book as a JSON array, in no particular order
pub async fn list_books(State(state): State<AppState>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.catalog.list_page().await?))
}

/// GET|POST /books/add?id=OWI
///
/// Looks the work up and stores it. Returns the created book, including
/// the key the database assigned.
pub async fn add_book(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequestParams(params): RequestParams<AddParams>,
) -> ApiResult<Json<Book>> {
    let timeout = lookup_timeout(&headers, state.lookup_timeout);
    let book = state.catalog.add(&params.id, timeout).await?;

    Ok(Json(book))
}

/// GET|POST /books/delete?pk=KEY
///
/// Empty 200 on success, including when no book has that key
pub async fn delete_book(
    State(state): State<AppState>,
    RequestParams(params): RequestParams<DeleteParams>,
) -> ApiResult<StatusCode> {
    let pk: i64 = params
        .pk
        .trim()
        .parse()
        .map_err(|e| ApiError::InvalidRequest(format!("primary key '{}': {}", params.pk, e)))?;

    state.catalog.delete(pk).await?;

    Ok(StatusCode::OK)
}

/// GET /ping
///
/// Database liveness as a bare JSON boolean
pub async fn ping(State(state): State<AppState>) -> Json<bool> {
    Json(state.catalog.store_alive().await)
}

/// Build catalog routes
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/books", get(list_books))
        .route("/books/add", get(add_book).post(add_book))
        .route("/books/delete", get(delete_book).post(delete_book))
        .route("/ping", get(ping))
}
