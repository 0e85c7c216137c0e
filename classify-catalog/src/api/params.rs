//! Request parameter extraction
//!
//! Handlers read their parameters from the query string and, for
//! urlencoded requests, from the form body. Both sources are merged; when
//! a key appears in both the body value wins, and when a key repeats the
//! first value wins. Extraction failures surface as
//! [`ApiError::InvalidRequest`], so they share the JSON error envelope.

use axum::{
    async_trait,
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, Method},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Parameters merged from the query string and an urlencoded body
#[derive(Debug, Clone)]
pub struct RequestParams<T>(pub T);

fn has_form_body(req: &Request) -> bool {
    if req.method() == Method::GET || req.method() == Method::HEAD {
        return false;
    }

    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

/// Merge pair lists into one object; earlier lists and earlier pairs win
fn merge_pairs(sources: [Vec<(String, String)>; 2]) -> Value {
    let mut merged = Map::new();
    for (key, value) in sources.into_iter().flatten() {
        merged.entry(key).or_insert(Value::String(value));
    }
    Value::Object(merged)
}

#[async_trait]
impl<T, S> FromRequest<S> for RequestParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
            .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

        let body = if has_form_body(&req) {
            let Form(body) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
            body
        } else {
            Vec::new()
        };

        serde_json::from_value(merge_pairs([body, query]))
            .map(RequestParams)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }
}
