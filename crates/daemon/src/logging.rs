//! Logging setup
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `qflow=info,tower_http=info`)
//! - `QFLOW_LOG_FORMAT`: `pretty` (default) or `json`
//! - `QFLOW_LOG_DIR`: also write daily-rotated `qflow.log` files here

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "qflow=info,tower_http=info";
const LOG_FILE_PREFIX: &str = "qflow.log";

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process so buffered file output is flushed on exit.
pub fn init() -> Result<Option<WorkerGuard>> {
    let log_format = std::env::var("QFLOW_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    let (file_layer, guard) = match std::env::var("QFLOW_LOG_DIR") {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    match log_format.as_str() {
        // Production: JSON structured logging
        "json" => registry.with(fmt::layer().json()).init(),
        // Development: Pretty formatting with colors
        _ => registry.with(fmt::layer().pretty()).init(),
    }

    Ok(guard)
}
