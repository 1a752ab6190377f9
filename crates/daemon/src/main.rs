//! QFlow Server - Main Entry Point
//! HTTP API over the patient registry and token queue

mod config;
mod logging;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

// Import workspace crates
use qflow_api_http::HttpServer;
use qflow_core::application::{PatientService, TokenService};
use qflow_core::port::time_provider::SystemTimeProvider;
use qflow_infra_sqlite::{
    create_pool, run_migrations, SqlitePatientRepository, SqliteTokenRepository,
};

use crate::config::ServerConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let _log_guard = logging::init()?;

    info!("QFlow server v{} starting...", VERSION);

    // 2. Load configuration
    let config = ServerConfig::load().context("Failed to load configuration")?;

    if let Some(parent) = config.database_file().as_deref().and_then(|p| p.parent()) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }

    info!(database_url = %config.database_url, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&config.database_url)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let patient_repo = Arc::new(SqlitePatientRepository::new(pool.clone()));
    let token_repo = Arc::new(SqliteTokenRepository::new(pool.clone()));

    let patients = Arc::new(PatientService::new(patient_repo));
    let tokens = Arc::new(
        TokenService::start(token_repo, time_provider)
            .await
            .context("Token service start failed")?,
    );

    // 5. Start HTTP server
    info!("Starting HTTP server...");
    let server = HttpServer::new(config.http(), patients, tokens);
    let handle = server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    info!(addr = %handle.local_addr(), "System ready. Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    handle
        .stop()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server stop failed: {}", e))?;
    pool.close().await;

    info!("Shutdown complete.");

    Ok(())
}
