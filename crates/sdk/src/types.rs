//! SDK Request/Response Types
//!
//! Mirrors the JSON bodies served by the api-http crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of POST /api/patients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub name: String,
    pub address: String,
    pub age: i32,
    pub contact_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub age: i32,
    pub contact_number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueTokenRequest {
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: i64,
    /// Display label, `T-<n>`
    pub token_number: String,
    pub user_name: String,
    pub is_served: bool,
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub waiting: i64,
    pub served: i64,
    pub total: i64,
    pub next_token_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
