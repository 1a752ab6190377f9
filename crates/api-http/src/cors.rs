//! Cross-origin policy: one allowed origin, fixed method list, any header.
//!
//! Only a request whose `Origin` matches the configured one gets
//! `Access-Control-Allow-Origin` back; other origins get no CORS headers.

use axum::http::header::InvalidHeaderValue;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origin: String,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Browsers send `Origin` without a trailing slash
    pub fn normalized_origin(&self) -> &str {
        self.allowed_origin.trim_end_matches('/')
    }

    /// Request headers are mirrored back rather than answered with `*`,
    /// which browsers reject when credentials are allowed.
    pub fn layer(&self) -> Result<CorsLayer, InvalidHeaderValue> {
        let allowed = HeaderValue::from_str(self.normalized_origin())?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _: &Parts| *origin == allowed,
            ))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials))
    }
}
