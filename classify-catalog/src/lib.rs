//! classify-catalog library
//!
//! Book catalog backed by a classification lookup service: search works by
//! title, add a chosen work with its recommended classification, list and
//! delete stored books.

pub mod api;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod render;
pub mod service;

pub use crate::error::{ApiError, ApiResult};
pub use crate::service::{CatalogService, ServiceError};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations
    pub catalog: Arc<CatalogService>,
    /// Default timeout for outbound lookups
    pub lookup_timeout: Duration,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: CatalogService, lookup_timeout: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            lookup_timeout,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::book_routes())
        .merge(api::search_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
