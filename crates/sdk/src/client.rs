//! QFlow Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    ErrorBody, HealthResponse, IssueTokenRequest, Patient, QueueStats, RegisterPatientRequest,
    Token,
};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// QFlow API Client
///
/// # Example
///
/// ```no_run
/// use qflow_sdk::QflowClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QflowClient::new("http://localhost:8080")?;
/// for token in client.list_tokens(Some(false)).await? {
///     println!("{} waiting: {}", token.token_number, token.user_name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QflowClient {
    http: Client,
    base_url: Url,
}

impl QflowClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:8080`)
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url.as_ref())?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /api/health
    pub async fn health(&self) -> Result<HealthResponse> {
        self.send(self.http.get(self.endpoint("api/health")?)).await
    }

    /// POST /api/patients
    pub async fn register_patient(&self, request: &RegisterPatientRequest) -> Result<Patient> {
        self.send(self.http.post(self.endpoint("api/patients")?).json(request))
            .await
    }

    /// GET /api/patients/{id}
    pub async fn get_patient(&self, id: i64) -> Result<Patient> {
        let url = self.endpoint(&format!("api/patients/{}", id))?;
        self.send(self.http.get(url)).await
    }

    /// POST /api/tokens
    pub async fn issue_token(&self, user_name: impl Into<String>) -> Result<Token> {
        let request = IssueTokenRequest {
            user_name: user_name.into(),
        };
        self.send(self.http.post(self.endpoint("api/tokens")?).json(&request))
            .await
    }

    /// GET /api/tokens, optionally filtered by served flag
    pub async fn list_tokens(&self, served: Option<bool>) -> Result<Vec<Token>> {
        let mut request = self.http.get(self.endpoint("api/tokens")?);
        if let Some(flag) = served {
            request = request.query(&[("served", flag)]);
        }
        self.send(request).await
    }

    /// GET /api/tokens/stats
    pub async fn queue_stats(&self) -> Result<QueueStats> {
        self.send(self.http.get(self.endpoint("api/tokens/stats")?))
            .await
    }

    /// PUT /api/tokens/{id}/serve
    pub async fn serve_token(&self, id: i64) -> Result<Token> {
        let url = self.endpoint(&format!("api/tokens/{}/serve", id))?;
        self.send(self.http.put(url)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SdkError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

/// Relative endpoint paths join under the base path only if it ends in `/`
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| SdkError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(SdkError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Prefer the server's `{"error": ...}` message, then the raw body
fn api_error(status: StatusCode, body: &str) -> SdkError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) if body.trim().is_empty() => format!("Request failed with status {}", status),
        Err(_) => body.to_string(),
    };

    SdkError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_under_base_path() {
        let client = QflowClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.endpoint("api/tokens").unwrap().as_str(),
            "http://localhost:8080/api/tokens"
        );

        let prefixed = QflowClient::new("https://example.org/queue").unwrap();
        assert_eq!(prefixed.base_url().as_str(), "https://example.org/queue/");
        assert_eq!(
            prefixed.endpoint("api/tokens/3/serve").unwrap().as_str(),
            "https://example.org/queue/api/tokens/3/serve"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            QflowClient::new("not a url"),
            Err(SdkError::InvalidUrl(_))
        ));
        assert!(matches!(
            QflowClient::new("mailto:desk@example.org"),
            Err(SdkError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_api_error_message_sources() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            r#"{"error":"Not found: Token 9 not found"}"#,
        );
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "API error (404): Not found: Token 9 not found"
        );

        let err = api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "API error (502): upstream down");

        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            err.to_string(),
            "API error (500): Request failed with status 500 Internal Server Error"
        );
    }
}
