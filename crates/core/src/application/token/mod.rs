// Token Service - ticket issuance, serving and queue queries

pub mod counter;
pub mod issue;
pub mod serve;

pub use counter::TicketCounter;

use crate::domain::{ServeOutcome, TicketNumber, Token, TokenId};
use crate::error::Result;
use crate::port::{TimeProvider, TokenRepository};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Queue snapshot for dashboards and the CLI status view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStats {
    pub waiting: i64,
    pub served: i64,
    pub total: i64,
    pub next_token_number: TicketNumber,
}

/// Token Service
pub struct TokenService {
    token_repo: Arc<dyn TokenRepository>,
    time_provider: Arc<dyn TimeProvider>,
    counter: TicketCounter,
}

impl TokenService {
    /// Build the service with its counter resumed from the store, so ticket
    /// numbers keep increasing across restarts over the same database.
    pub async fn start(
        token_repo: Arc<dyn TokenRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let last_issued = token_repo.max_ticket_sequence().await?;
        let counter = TicketCounter::resume_after(last_issued);
        info!(
            last_issued,
            next_token_number = %counter.peek()?,
            "Ticket counter initialized"
        );
        Ok(Self::with_counter(token_repo, time_provider, counter))
    }

    pub fn with_counter(
        token_repo: Arc<dyn TokenRepository>,
        time_provider: Arc<dyn TimeProvider>,
        counter: TicketCounter,
    ) -> Self {
        Self {
            token_repo,
            time_provider,
            counter,
        }
    }

    /// Issue the next ticket for `user_name`
    pub async fn issue(&self, user_name: impl Into<String>) -> Result<Token> {
        issue::execute(
            self.token_repo.as_ref(),
            self.time_provider.as_ref(),
            &self.counter,
            user_name.into(),
        )
        .await
    }

    /// Mark a token as served
    pub async fn serve(&self, id: TokenId) -> Result<ServeOutcome> {
        serve::execute(self.token_repo.as_ref(), id).await
    }

    /// List tokens, optionally only those with the given served flag
    pub async fn list(&self, served: Option<bool>) -> Result<Vec<Token>> {
        match served {
            Some(flag) => self.token_repo.find_by_served(flag).await,
            None => self.token_repo.find_all().await,
        }
    }

    pub async fn stats(&self) -> Result<QueueStats> {
        let waiting = self.token_repo.count_by_served(false).await?;
        let served = self.token_repo.count_by_served(true).await?;

        Ok(QueueStats {
            waiting,
            served,
            total: waiting + served,
            next_token_number: self.counter.peek()?,
        })
    }
}
