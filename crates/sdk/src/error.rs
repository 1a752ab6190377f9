//! SDK Error Types

use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    /// The server answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connection, timeout or body decoding failure
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SdkError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Api { status: 404, .. })
    }
}
