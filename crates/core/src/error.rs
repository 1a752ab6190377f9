// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Database(String)
