//! Catalog orchestration
//!
//! Sequences lookups and storage for the four user-facing operations. Every
//! call is a single stateless request/response cycle; failures from either
//! collaborator are returned unchanged, with no recovery or compensation.

use crate::classify::{CatalogLookup, LookupError, SearchResult};
use crate::db::{Book, BookRepository, StorageError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Failure of a catalog operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Catalog operations over a lookup service and a book repository
#[derive(Clone)]
pub struct CatalogService {
    lookup: Arc<dyn CatalogLookup>,
    books: Arc<dyn BookRepository>,
}

impl CatalogService {
    pub fn new(lookup: Arc<dyn CatalogLookup>, books: Arc<dyn BookRepository>) -> Self {
        Self { lookup, books }
    }

    /// Every stored book, for rendering the catalog page
    pub async fn list_page(&self) -> Result<Vec<Book>, ServiceError> {
        Ok(self.books.list_all().await?)
    }

    /// Title search against the lookup service. Never touches storage.
    pub async fn search(
        &self,
        query: &str,
        timeout: Duration,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        Ok(self.lookup.search(query, timeout).await?)
    }

    /// Look up `external_id` and store it as a new book
    ///
    /// The store's liveness is checked before the write and the insert is
    /// skipped when it does not answer. Adding the same identifier twice stores two books.
    pub async fn add(&self, external_id: &str, timeout: Duration) -> Result<Book, ServiceError> {
        let work = self.lookup.find(external_id, timeout).await?;

        if !self.books.ping().await {
            return Err(StorageError::ConnectionFailure(
                "database did not answer the liveness check".to_string(),
            )
            .into());
        }

        let book = self
            .books
            .insert(&work.title, &work.author, &work.id, &work.most_popular)
            .await?;

        info!(
            pk = book.pk,
            owi = %work.id,
            title = %book.title,
            classification = %book.classification,
            "Added book"
        );

        Ok(book)
    }

    /// Delete a stored book; a missing key still succeeds
    pub async fn delete(&self, pk: i64) -> Result<(), ServiceError> {
        self.books.delete_by_key(pk).await?;
        info!(pk, "Deleted book");
        Ok(())
    }

    /// Liveness of the book store
    pub async fn store_alive(&self) -> bool {
        self.books.ping().await
    }
}
