//! Database Module
//!
//! Connection pool, schema bootstrap and the per-entity query modules.
//!
//! Every read acquires one pooled connection; every write runs its
//! validation and statement inside one `BEGIN IMMEDIATE` transaction.
//! Connections go back to the pool when the guard drops, on error paths
//! included.

pub mod aggregates;
pub mod dishes;
pub mod menus;
pub mod submenus;
pub mod validation;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::config::Config;

pub use validation::{dish_exists, menu_exists, submenu_exists};

// == Records ==
/// Row of the `menus` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MenuRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Row of the `submenus` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SubMenuRecord {
    pub id: i64,
    pub menu_id: i64,
    pub title: String,
    pub description: String,
}

/// Row of the `dishes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DishRecord {
    pub id: i64,
    pub submenu_id: i64,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
}

/// Menu joined with its aggregates.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MenuWithCounts {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub submenus_count: i64,
    pub dishes_count: i64,
}

/// Submenu joined with its aggregate.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SubMenuWithCounts {
    pub id: i64,
    pub menu_id: i64,
    pub title: String,
    pub description: String,
    pub dishes_count: i64,
}

// == Pool ==
/// How long a connection waits for another writer to release the lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the connection pool and makes sure the schema exists.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = config.database_url.contains(":memory:");

    let mut opts = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    if !in_memory {
        opts = opts.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_opts = SqlitePoolOptions::new().max_connections(config.db_max_connections);
    if in_memory {
        // Each connection to :memory: is its own database, so keep exactly one alive
        pool_opts = pool_opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let db = pool_opts.connect_with(opts).await?;
    init_db(&db).await?;

    info!(
        "Database ready at {} (max {} connections)",
        config.database_url, config.db_max_connections
    );
    Ok(db)
}

/// Opens a transaction holding the write lock from its first statement.
///
/// Writes here read before they write. Under WAL a deferred transaction
/// cannot upgrade its read snapshot once another connection has committed
/// and fails with `SQLITE_BUSY` instead of waiting on the busy timeout.
pub async fn begin_write(db: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    db.begin_with("BEGIN IMMEDIATE").await
}

/// Initialize the database schema with all required tables and indexes
pub async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS menus (
            id integer PRIMARY KEY AUTOINCREMENT,
            title text NOT NULL UNIQUE,
            description text NOT NULL
        )",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS submenus (
            id integer PRIMARY KEY AUTOINCREMENT,
            menu_id integer NOT NULL REFERENCES menus(id) ON DELETE CASCADE,
            title text NOT NULL UNIQUE,
            description text NOT NULL
        )",
    )
    .execute(&mut *tx)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_submenus_menu_id ON submenus(menu_id)")
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS dishes (
            id integer PRIMARY KEY AUTOINCREMENT,
            submenu_id integer NOT NULL REFERENCES submenus(id) ON DELETE CASCADE,
            title text NOT NULL UNIQUE,
            description text NOT NULL,
            price_cents integer NOT NULL CHECK (price_cents >= 0)
        )",
    )
    .execute(&mut *tx)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dishes_submenu_id ON dishes(submenu_id)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await
}

/// Round-trips a trivial query; used by the health endpoint.
pub async fn ping(db: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").execute(db).await.is_ok()
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    connect(&Config::in_memory()).await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_creates_schema() {
        let db = test_pool().await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('menus', 'submenus', 'dishes') ORDER BY name",
        )
        .fetch_all(&db)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, ["dishes", "menus", "submenus"]);
        assert!(ping(&db).await);
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let db = test_pool().await;
        init_db(&db).await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = test_pool().await;

        let orphan = sqlx::query("INSERT INTO submenus (menu_id, title, description) VALUES (42, 'x', 'y')")
            .execute(&db)
            .await;
        assert!(orphan.is_err());
    }

    async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let config = Config {
            database_url: format!("sqlite:{}", dir.path().join("menu.db").display()),
            db_max_connections: 4,
            ..Config::in_memory()
        };
        connect(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_pool(&dir).await;

        let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(mode, "wal");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_read_then_write_transactions_do_not_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_pool(&dir).await;
        sqlx::query("INSERT INTO menus (title, description) VALUES ('Menu', 'd')")
            .execute(&db)
            .await
            .unwrap();

        let writers: Vec<_> = (0..40)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let mut tx = begin_write(&db).await?;
                    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menus")
                        .fetch_one(&mut *tx)
                        .await?;
                    sqlx::query("UPDATE menus SET description = ? WHERE id = 1")
                        .bind(format!("rev {}", i + count))
                        .execute(&mut *tx)
                        .await?;
                    tx.commit().await
                })
            })
            .collect();

        for writer in writers {
            writer.await.unwrap().unwrap();
        }
    }
}
