// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use qflow_core::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const MAX_CONNECTIONS: u32 = 10;

/// Create SQLite connection pool with WAL mode
///
/// Accepts `sqlite://path`, a bare file path, or `:memory:` / `sqlite::memory:`.
/// An in-memory database lives inside a single connection, so the pool is
/// pinned to one connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(map_sqlx_error)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .create_if_missing(true);

    let pool_options = if is_memory_url(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;

    tracing::debug!(database_url = %database_url, "SQLite pool ready");
    Ok(pool)
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
