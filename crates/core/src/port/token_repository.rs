// Token Repository Port (Interface)

use crate::domain::{NewToken, ServeOutcome, Token, TokenId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Token persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a new waiting token, returning it with its store-generated ID
    async fn insert(&self, token: &NewToken) -> Result<Token>;

    /// Find token by ID
    async fn find_by_id(&self, id: TokenId) -> Result<Option<Token>>;

    /// All tokens in ascending ID order
    async fn find_all(&self) -> Result<Vec<Token>>;

    /// Tokens with the given served flag, ascending ID order
    async fn find_by_served(&self, served: bool) -> Result<Vec<Token>>;

    /// Count tokens with the given served flag
    async fn count_by_served(&self, served: bool) -> Result<i64>;

    /// Flip `is_served` to true if it is still false.
    ///
    /// Fails with `AppError::NotFound` when no token has this ID.
    /// A token that is already served is returned unchanged as
    /// `ServeOutcome::AlreadyServed`.
    async fn mark_served(&self, id: TokenId) -> Result<ServeOutcome>;

    /// Highest ticket sequence ever persisted (0 on an empty store)
    async fn max_ticket_sequence(&self) -> Result<u64>;
}
