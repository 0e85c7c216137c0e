//! Classify HTTP client
//!
//! One GET per call, no retry, no caching. The caller supplies the timeout.

use super::response::{decode_find, decode_search};
use super::{CatalogLookup, ClassificationLookup, LookupError, SearchResult};
use async_trait::async_trait;
use std::time::Duration;

/// Public OCLC Classify endpoint
pub const DEFAULT_CLASSIFY_URL: &str = "http://classify.oclc.org/classify2/Classify";

const USER_AGENT: &str = concat!("classify-catalog/", env!("CARGO_PKG_VERSION"));

/// Classification service client
#[derive(Debug, Clone)]
pub struct ClassifyClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ClassifyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::TransportFailure(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// GET `<base>?summary=true&<key>=<value>` and return the body text
    async fn fetch(&self, key: &str, value: &str, timeout: Duration) -> Result<String, LookupError> {
        tracing::debug!(url = %self.base_url, key, value, ?timeout, "Querying Classify");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("summary", "true"), (key, value)])
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| LookupError::TransportFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::TransportFailure(format!(
                "Classify returned HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| LookupError::TransportFailure(e.to_string()))
    }
}

#[async_trait]
impl CatalogLookup for ClassifyClient {
    async fn search(
        &self,
        title: &str,
        timeout: Duration,
    ) -> Result<Vec<SearchResult>, LookupError> {
        let body = self.fetch("title", title, timeout).await?;
        let results = decode_search(&body)?;

        tracing::debug!(title, count = results.len(), "Classify title search complete");

        Ok(results)
    }

    async fn find(
        &self,
        external_id: &str,
        timeout: Duration,
    ) -> Result<ClassificationLookup, LookupError> {
        let body = self.fetch("owi", external_id, timeout).await?;
        let lookup = decode_find(&body)?;

        tracing::info!(
            owi = %lookup.id,
            title = %lookup.title,
            classification = %lookup.most_popular,
            "Retrieved work from Classify"
        );

        Ok(lookup)
    }
}
