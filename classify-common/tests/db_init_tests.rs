//! Unit tests for database initialization
//!
//! The database is created automatically on first run and reopened without
//! loss on later runs.

use classify_common::db::init::{init_database, init_memory_database};
use tempfile::TempDir;

async fn book_columns(pool: &sqlx::SqlitePool) -> Vec<String> {
    sqlx::query_scalar("SELECT name FROM pragma_table_info('books') ORDER BY cid")
        .fetch_all(pool)
        .await
        .expect("Failed to read table info")
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("catalog.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_books_schema_created() {
    let pool = init_memory_database().await.unwrap();

    assert_eq!(
        book_columns(&pool).await,
        vec!["pk", "title", "author", "owi", "classification"]
    );
}

#[tokio::test]
async fn test_database_opens_existing_without_data_loss() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO books (title, author, owi, classification) VALUES ('Dune', 'Herbert', '1', '813')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let reopened = init_database(&db_path)
        .await
        .expect("Failed to open existing database");
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&reopened)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_database_uses_wal_journal() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");

    let pool = init_database(&db_path).await.unwrap();
    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(mode.to_lowercase(), "wal");
}
