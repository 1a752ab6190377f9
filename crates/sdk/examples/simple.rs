//! Simple SDK Example
//!
//! Registers a patient, issues two tickets, serves the first and prints the
//! queue.
//!
//! # Usage
//!
//! 1. Start the server:
//!    ```bash
//!    cargo run --package qflow-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package qflow-sdk --example simple
//!    ```

use qflow_sdk::{QflowClient, RegisterPatientRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = QflowClient::new("http://localhost:8080")?;

    let health = client.health().await?;
    println!("Server {} (v{})", health.status, health.version);

    let patient = client
        .register_patient(&RegisterPatientRequest {
            name: "Alice".to_string(),
            address: "1 Main St".to_string(),
            age: 30,
            contact_number: "555-1111".to_string(),
        })
        .await?;
    println!("Registered patient #{}: {}", patient.id, patient.name);

    let first = client.issue_token(&patient.name).await?;
    let second = client.issue_token("Bob").await?;
    println!("Issued {} and {}", first.token_number, second.token_number);

    let served = client.serve_token(first.id).await?;
    println!("Served {}", served.token_number);

    for token in client.list_tokens(Some(false)).await? {
        println!("  waiting: {} ({})", token.token_number, token.user_name);
    }

    let stats = client.queue_stats().await?;
    println!(
        "{} waiting, {} served, next ticket {}",
        stats.waiting, stats.served, stats.next_token_number
    );

    Ok(())
}
