// Issue Token Use Case

use super::counter::TicketCounter;
use crate::domain::{NewToken, Token};
use crate::error::Result;
use crate::port::{TimeProvider, TokenRepository};
use tracing::{info, warn};

/// Execute issue use case
///
/// # Arguments
///
/// * `token_repo` - Token repository
/// * `time_provider` - Clock for the issuance timestamp
/// * `counter` - Ticket counter owned by the calling service
/// * `user_name` - Requester's display name (stored as given)
pub async fn execute(
    token_repo: &dyn TokenRepository,
    time_provider: &dyn TimeProvider,
    counter: &TicketCounter,
    user_name: String,
) -> Result<Token> {
    let ticket = counter.next_ticket()?;
    let new_token = NewToken::issue(ticket, user_name, time_provider.now());

    // No retry: a failed insert leaves this ticket number unused
    match token_repo.insert(&new_token).await {
        Ok(token) => {
            info!(
                token_id = token.id,
                token_number = %token.token_number,
                user_name = %token.user_name,
                "Token issued"
            );
            Ok(token)
        }
        Err(e) => {
            warn!(token_number = %ticket, error = %e, "Failed to persist token");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::port::token_repository::MockTokenRepository;
    use chrono::{DateTime, Utc};

    struct FixedClock(DateTime<Utc>);

    impl TimeProvider for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn echo_insert(repo: &mut MockTokenRepository) {
        repo.expect_insert().returning(|new| {
            Ok(Token {
                id: new.token_number.sequence() as i64 + 100,
                token_number: new.token_number,
                user_name: new.user_name.clone(),
                is_served: false,
                date_time: new.date_time,
            })
        });
    }

    #[tokio::test]
    async fn test_issue_numbers_and_stamps_token() {
        let mut repo = MockTokenRepository::new();
        echo_insert(&mut repo);
        let clock = FixedClock(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let counter = TicketCounter::new();

        let first = execute(&repo, &clock, &counter, "A".to_string())
            .await
            .unwrap();
        let second = execute(&repo, &clock, &counter, "".to_string())
            .await
            .unwrap();

        assert_eq!(first.token_number.to_string(), "T-1");
        assert_eq!(first.id, 101);
        assert!(!first.is_served);
        assert_eq!(first.date_time, clock.0);

        assert_eq!(second.token_number.to_string(), "T-2");
        assert_eq!(second.user_name, "");
    }

    #[tokio::test]
    async fn test_issue_failure_propagates_and_consumes_number() {
        let mut repo = MockTokenRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::Database("disk I/O error".to_string())));
        let clock = FixedClock(Utc::now());
        let counter = TicketCounter::new();

        let err = execute(&repo, &clock, &counter, "A".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(counter.peek().unwrap().to_string(), "T-2");
    }
}
