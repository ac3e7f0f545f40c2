//! Store handle: connection pool, schema creation.

use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StoreResult;

const MAX_CONNECTIONS: u32 = 4;

/// Handle to the SQLite store.
///
/// Cheap to clone (shares the pool). The per-entity capability methods live in
/// the sibling modules as `impl Store` blocks; this module owns opening the
/// database and creating the schema.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database at `path` (creating the file if missing), create the
    /// schema idempotently and seed the default administrator if the user
    /// table is empty.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        store.seed_default_admin().await?;
        tracing::info!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// Open a fresh in-memory database (used by tests).
    ///
    /// Pinned to a single pooled connection: every handle must land on the
    /// same in-memory instance.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        store.seed_default_admin().await?;
        Ok(store)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                name          TEXT NOT NULL,
                category      TEXT NOT NULL,
                quantity      INTEGER NOT NULL DEFAULT 0,
                unit          TEXT NOT NULL DEFAULT 'piece',
                unit_price    REAL NOT NULL DEFAULT 0.0,
                min_threshold INTEGER NOT NULL DEFAULT 10,
                created_at    TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS stock_entries (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                article_id  INTEGER NOT NULL REFERENCES articles(id),
                quantity    INTEGER NOT NULL,
                entry_date  TEXT NOT NULL,
                supplier    TEXT,
                total_price REAL NOT NULL DEFAULT 0.0,
                comment     TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS stock_exits (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                article_id INTEGER NOT NULL REFERENCES articles(id),
                quantity   INTEGER NOT NULL,
                exit_date  TEXT NOT NULL,
                reason     TEXT NOT NULL,
                actor      TEXT,
                comment    TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                username      TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role          TEXT NOT NULL DEFAULT 'standard',
                created_at    TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_stock_entries_article ON stock_entries(article_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_stock_exits_article ON stock_exits(article_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.db");

        let store = Store::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.list_articles().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.db");

        {
            let store = Store::open(&path).await.unwrap();
            assert_eq!(store.list_users().await.unwrap().len(), 1);
        }

        // Second open must not re-create tables or re-seed.
        let store = Store::open(&path).await.unwrap();
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }
}
