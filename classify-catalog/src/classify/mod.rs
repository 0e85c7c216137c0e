//! Classification service integration
//!
//! Talks to one remote classification endpoint (OCLC Classify style) and
//! normalizes its XML responses into [`SearchResult`] and
//! [`ClassificationLookup`] records.

pub mod client;
pub mod response;

pub use client::{ClassifyClient, DEFAULT_CLASSIFY_URL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Lookup failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// Request could not be sent, timed out, answered with a non-success
    /// status, or its body could not be read
    #[error("Classify transport failure: {0}")]
    TransportFailure(String),

    /// Body does not match the expected response schema
    #[error("Classify decode failure: {0}")]
    DecodeFailure(String),
}

/// One candidate work from a title search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub author: String,
    /// Publication year as reported by the service (may be empty)
    pub year: String,
    /// External work identifier (OWI)
    pub id: String,
}

/// Detail for a single work, looked up by external identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationLookup {
    pub title: String,
    pub author: String,
    /// External work identifier (OWI)
    pub id: String,
    /// Most popular classification code (e.g., DDC "813.54")
    pub most_popular: String,
}

/// Read-only view of a classification service
///
/// Every call is a fresh round trip bounded by `timeout`.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Search works by title. No matches is an empty vector.
    async fn search(
        &self,
        title: &str,
        timeout: Duration,
    ) -> Result<Vec<SearchResult>, LookupError>;

    /// Look up one work and its recommended classification
    async fn find(
        &self,
        external_id: &str,
        timeout: Duration,
    ) -> Result<ClassificationLookup, LookupError>;
}
