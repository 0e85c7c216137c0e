//! Database access for classify-catalog
//!
//! The catalog stores books in the SQLite database opened by
//! `classify_common::db::init_database`.

pub mod books;

pub use books::{Book, BookRepository, SqliteBookRepository};

use thiserror::Error;

/// Storage failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The database could not be reached (pool exhausted or closed, I/O, TLS)
    #[error("Storage connection failure: {0}")]
    ConnectionFailure(String),

    /// The statement failed or a row could not be decoded
    #[error("Storage query failure: {0}")]
    QueryFailure(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StorageError::ConnectionFailure(err.to_string()),
            _ => StorageError::QueryFailure(err.to_string()),
        }
    }
}
