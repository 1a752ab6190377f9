// Migration Runner

use crate::error::map_sqlx_error;
use qflow_core::error::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Ordered migrations: (version, description, SQL)
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "Initial schema",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    let current_version = current_version(pool).await?;
    info!("Current schema version: {}", current_version);

    // Apply migrations sequentially
    for (version, description, sql) in MIGRATIONS {
        if current_version < *version {
            info!("Applying migration {:03}: {}", version, description);
            apply_migration(pool, sql).await?;
        }
    }

    info!("All migrations applied successfully");
    Ok(())
}

async fn current_version(pool: &SqlitePool) -> Result<i64> {
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await
    .map_err(map_sqlx_error)?;

    if table_exists == 0 {
        return Ok(0);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await
            .map_err(map_sqlx_error)?;

    Ok(version.unwrap_or(0))
}

/// Apply a single migration SQL file
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<()> {
    // Execute migration in a transaction
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    for statement in split_statements(sql) {
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
    }

    tx.commit().await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Drop `--` comment lines first, then split on `;`
fn split_statements(sql: &str) -> Vec<String> {
    let without_comments = sql
        .lines()
        .filter(|line| !line.trim().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}
