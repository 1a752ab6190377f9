//! HTTP Request/Response Types
//!
//! Patient and Token bodies are the core entities themselves; only the
//! shapes that exist purely at the HTTP edge live here.

use serde::{Deserialize, Serialize};

/// POST /api/tokens
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenRequest {
    pub user_name: String,
}

/// GET /api/tokens query string
#[derive(Debug, Default, Deserialize)]
pub struct ListTokensQuery {
    pub served: Option<bool>,
}

/// GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
