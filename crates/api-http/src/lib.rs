//! HTTP API Layer
//!
//! REST/JSON surface of the QFlow patient queue: patients, tokens, health.

pub mod cors;
pub mod error;
pub mod extract;
pub mod handler;
pub mod server;
pub mod types;

pub use cors::CorsConfig;
pub use error::ApiError;
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use server::{build_router, AppState, HttpServer, HttpServerConfig, ServerHandle};
