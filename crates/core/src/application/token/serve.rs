// Serve Token Use Case

use crate::domain::{ServeOutcome, TokenId};
use crate::error::Result;
use crate::port::TokenRepository;
use tracing::{debug, info};

/// Execute serve use case
///
/// Serving is idempotent: a token that was already served comes back
/// unchanged as `ServeOutcome::AlreadyServed` and nothing is rewritten.
pub async fn execute(token_repo: &dyn TokenRepository, id: TokenId) -> Result<ServeOutcome> {
    let outcome = token_repo.mark_served(id).await?;

    match &outcome {
        ServeOutcome::Served(token) => {
            info!(token_id = id, token_number = %token.token_number, "Token marked as served");
        }
        ServeOutcome::AlreadyServed(token) => {
            debug!(token_id = id, token_number = %token.token_number, "Token already served");
        }
    }

    Ok(outcome)
}
