//! HTTP Route Handlers
//!
//! Thin adapters: extract, call the service, serialize.

use axum::extract::State;
use axum::Json;
use qflow_core::application::QueueStats;
use qflow_core::domain::{NewPatient, Patient, PatientId, Token, TokenId};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::AppState;
use crate::types::{HealthResponse, IssueTokenRequest, ListTokensQuery};

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: qflow_core::VERSION,
    })
}

/// POST /api/patients (also /api/patients/register)
pub async fn register_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewPatient>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.patients.register(req).await?;
    Ok(Json(patient))
}

/// GET /api/patients/:id
pub async fn get_patient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PatientId>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.patients.get(id).await?;
    Ok(Json(patient))
}

/// POST /api/tokens
pub async fn issue_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<IssueTokenRequest>,
) -> Result<Json<Token>, ApiError> {
    let token = state.tokens.issue(req.user_name).await?;
    Ok(Json(token))
}

/// GET /api/tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTokensQuery>,
) -> Result<Json<Vec<Token>>, ApiError> {
    let tokens = state.tokens.list(query.served).await?;
    Ok(Json(tokens))
}

/// GET /api/tokens/stats
pub async fn token_stats(State(state): State<AppState>) -> Result<Json<QueueStats>, ApiError> {
    let stats = state.tokens.stats().await?;
    Ok(Json(stats))
}

/// PUT /api/tokens/:id/serve
pub async fn serve_token(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<TokenId>,
) -> Result<Json<Token>, ApiError> {
    let outcome = state.tokens.serve(id).await?;
    Ok(Json(outcome.into_token()))
}
