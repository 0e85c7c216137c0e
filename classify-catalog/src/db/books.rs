//! Book database operations

use super::StorageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Stored book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Primary key assigned by the database on insert
    pub pk: i64,
    pub title: String,
    pub author: String,
    /// Classification code copied from the lookup the book was added from
    pub classification: String,
}

/// Storage of [`Book`] records
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All stored books, in no particular order
    async fn list_all(&self) -> Result<Vec<Book>, StorageError>;

    /// Insert a book and return it with its assigned key
    async fn insert(
        &self,
        title: &str,
        author: &str,
        external_id: &str,
        classification: &str,
    ) -> Result<Book, StorageError>;

    /// Delete by key. A key with no row is not an error.
    async fn delete_by_key(&self, pk: i64) -> Result<(), StorageError>;

    /// Liveness check; a failed check is `false`, never an error
    async fn ping(&self) -> bool;
}

/// [`BookRepository`] over a pooled SQLite connection set
#[derive(Debug, Clone)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn book_from_row(row: &SqliteRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        pk: row.try_get("pk")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        classification: row.try_get("classification")?,
    })
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, StorageError> {
        let rows = sqlx::query("SELECT pk, title, author, classification FROM books")
            .fetch_all(&self.pool)
            .await?;

        // One bad row fails the whole listing
        let books = rows
            .iter()
            .map(book_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    async fn insert(
        &self,
        title: &str,
        author: &str,
        external_id: &str,
        classification: &str,
    ) -> Result<Book, StorageError> {
        let pk: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, author, owi, classification)
            VALUES (?, ?, ?, ?)
            RETURNING pk
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(external_id)
        .bind(classification)
        .fetch_one(&self.pool)
        .await?;

        Ok(Book {
            pk,
            title: title.to_string(),
            author: author.to_string(),
            classification: classification.to_string(),
        })
    }

    async fn delete_by_key(&self, pk: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM books WHERE pk = ?")
            .bind(pk)
            .execute(&self.pool)
            .await?;

        tracing::debug!(pk, rows_affected = result.rows_affected(), "Deleted book");

        Ok(())
    }

    async fn ping(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database liveness check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classify_common::db::init_memory_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> SqliteBookRepository {
        let pool = init_memory_database()
            .await
            .expect("Failed to create in-memory database");
        SqliteBookRepository::new(pool)
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_key() {
        let repo = repository().await;

        let book = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();

        assert_eq!(
            book,
            Book {
                pk: 1,
                title: "Dune".to_string(),
                author: "Herbert".to_string(),
                classification: "813".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let repo = repository().await;

        let dune = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();
        let hobbit = repo.insert("The Hobbit", "Tolkien", "1151", "823.912").await.unwrap();

        let mut books = repo.list_all().await.unwrap();
        books.sort_by_key(|b| b.pk);

        assert_eq!(books, vec![dune, hobbit]);
    }

    #[tokio::test]
    async fn test_same_external_id_twice_creates_two_rows() {
        let repo = repository().await;

        let first = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();
        let second = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();

        assert_ne!(first.pk, second.pk);
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_external_id_is_stored() {
        let repo = repository().await;
        repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();

        let owi: String = sqlx::query_scalar("SELECT owi FROM books")
            .fetch_one(&repo.pool)
            .await
            .unwrap();

        assert_eq!(owi, "12345");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repository().await;
        let book = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();

        repo.delete_by_key(book.pk).await.unwrap();
        repo.delete_by_key(book.pk).await.unwrap();

        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_key_succeeds() {
        let repo = repository().await;
        let kept = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap();

        repo.delete_by_key(999).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_ping_reports_liveness() {
        let repo = repository().await;
        assert!(repo.ping().await);

        repo.pool.close().await;
        assert!(!repo.ping().await);
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_failure() {
        let repo = repository().await;
        repo.pool.close().await;

        let err = repo.list_all().await.unwrap_err();

        assert!(matches!(err, StorageError::ConnectionFailure(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_missing_table_is_query_failure() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = SqliteBookRepository::new(pool);

        let err = repo.insert("Dune", "Herbert", "12345", "813").await.unwrap_err();

        assert!(matches!(err, StorageError::QueryFailure(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_undecodable_row_fails_whole_listing() {
        // Loose schema so a NULL title can be stored
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE books (pk INTEGER PRIMARY KEY, title TEXT, author TEXT, owi TEXT, classification TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO books (title, author, owi, classification) VALUES ('Dune', 'Herbert', '1', '813'), (NULL, 'Nobody', '2', '000')")
            .execute(&pool)
            .await
            .unwrap();
        let repo = SqliteBookRepository::new(pool);

        let err = repo.list_all().await.unwrap_err();

        assert!(matches!(err, StorageError::QueryFailure(_)), "got {:?}", err);
    }
}
