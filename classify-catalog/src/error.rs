//! HTTP error boundary for classify-catalog
//!
//! Every failure is reported as 500 with the underlying message attached:
//!
//! ```json
//! {"error": {"code": "LOOKUP_ERROR", "message": "Classify transport failure: ..."}}
//! ```

use crate::classify::LookupError;
use crate::db::StorageError;
use crate::service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Catalog operation failed
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Request could not be turned into an operation (e.g., non-numeric key)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog page could not be rendered
    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Service(ServiceError::Lookup(LookupError::TransportFailure(_))) => {
                "LOOKUP_TRANSPORT_ERROR"
            }
            ApiError::Service(ServiceError::Lookup(LookupError::DecodeFailure(_))) => {
                "LOOKUP_DECODE_ERROR"
            }
            ApiError::Service(ServiceError::Storage(StorageError::ConnectionFailure(_))) => {
                "STORAGE_CONNECTION_ERROR"
            }
            ApiError::Service(ServiceError::Storage(StorageError::QueryFailure(_))) => {
                "STORAGE_QUERY_ERROR"
            }
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::Render(_) => "RENDER_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = self.to_string();

        tracing::error!(code, "{}", message);

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
