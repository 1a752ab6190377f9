//! QFlow SDK - Rust Client Library
//!
//! Typed async client for the QFlow patient queue HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use qflow_sdk::QflowClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QflowClient::new("http://localhost:8080")?;
//!
//!     let token = client.issue_token("Alice").await?;
//!     println!("Your ticket: {}", token.token_number);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::QflowClient;
pub use error::{Result, SdkError};
pub use types::{HealthResponse, Patient, QueueStats, RegisterPatientRequest, Token};
