// SQLite TokenRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qflow_core::domain::{DomainError, NewToken, ServeOutcome, TicketNumber, Token, TokenId};
use qflow_core::error::{AppError, Result};
use qflow_core::port::TokenRepository;
use sqlx::SqlitePool;

pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn insert(&self, token: &NewToken) -> Result<Token> {
        let sequence = i64::try_from(token.token_number.sequence()).map_err(|_| {
            AppError::Database(format!(
                "Ticket {} exceeds storage range",
                token.token_number
            ))
        })?;

        let row = sqlx::query_as::<_, TokenRow>(
            r#"
            INSERT INTO tokens (ticket_number, user_name, is_served, date_time)
            VALUES (?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(sequence)
        .bind(&token.user_name)
        .bind(token.date_time)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.into_token()
    }

    async fn find_by_id(&self, id: TokenId) -> Result<Option<Token>> {
        let row = sqlx::query_as::<_, TokenRow>("SELECT * FROM tokens WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(TokenRow::into_token).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Token>> {
        let rows: Vec<TokenRow> = sqlx::query_as("SELECT * FROM tokens ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(TokenRow::into_token).collect()
    }

    async fn find_by_served(&self, served: bool) -> Result<Vec<Token>> {
        let rows: Vec<TokenRow> = sqlx::query_as(
            r#"
            SELECT * FROM tokens
            WHERE is_served = ?
            ORDER BY id ASC
            "#,
        )
        .bind(served)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(TokenRow::into_token).collect()
    }

    async fn count_by_served(&self, served: bool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tokens WHERE is_served = ?")
            .bind(served)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn mark_served(&self, id: TokenId) -> Result<ServeOutcome> {
        // Conditional update: only a waiting token is written
        let updated = sqlx::query_as::<_, TokenRow>(
            r#"
            UPDATE tokens
            SET is_served = 1
            WHERE id = ? AND is_served = 0
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if let Some(row) = updated {
            return Ok(ServeOutcome::Served(row.into_token()?));
        }

        // Nothing updated: either missing or already served
        match self.find_by_id(id).await? {
            Some(token) => Ok(ServeOutcome::AlreadyServed(token)),
            None => Err(AppError::NotFound(format!("Token {} not found", id))),
        }
    }

    async fn max_ticket_sequence(&self) -> Result<u64> {
        let max: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(ticket_number), 0) FROM tokens")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        u64::try_from(max).map_err(|_| DomainError::TicketOutOfRange(max).into())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct TokenRow {
    id: i64,
    ticket_number: i64,
    user_name: String,
    is_served: bool,
    date_time: DateTime<Utc>,
}

impl TokenRow {
    fn into_token(self) -> Result<Token> {
        Ok(Token {
            id: self.id,
            token_number: TicketNumber::try_from(self.ticket_number)?,
            user_name: self.user_name,
            is_served: self.is_served,
            date_time: self.date_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup_test_db() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    fn new_token(sequence: u64, user_name: &str) -> NewToken {
        NewToken::issue(TicketNumber::new(sequence).unwrap(), user_name, Utc::now())
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);

        let issued_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let new = NewToken::issue(TicketNumber::FIRST, "A", issued_at);
        let token = repo.insert(&new).await.unwrap();

        assert!(token.id > 0);
        assert_eq!(token.token_number.to_string(), "T-1");
        assert_eq!(token.user_name, "A");
        assert!(!token.is_served);
        assert_eq!(token.date_time, issued_at);

        let found = repo.find_by_id(token.id).await.unwrap();
        assert_eq!(found, Some(token));
    }

    #[tokio::test]
    async fn test_duplicate_ticket_number_is_rejected() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);

        repo.insert(&new_token(1, "A")).await.unwrap();
        let err = repo.insert(&new_token(1, "B")).await.unwrap_err();

        match err {
            AppError::Database(msg) => assert!(msg.contains("Unique constraint"), "{msg}"),
            other => panic!("expected database error, got {other:?}"),
        }
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);

        for (seq, name) in [(1, "A"), (2, "B"), (3, "C")] {
            repo.insert(&new_token(seq, name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.user_name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_mark_served_transitions_once() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);
        let token = repo.insert(&new_token(1, "A")).await.unwrap();

        let first = repo.mark_served(token.id).await.unwrap();
        assert!(matches!(first, ServeOutcome::Served(ref t) if t.is_served));
        assert_eq!(first.token().date_time, token.date_time);

        let second = repo.mark_served(token.id).await.unwrap();
        assert!(second.was_already_served());
        assert!(second.token().is_served);

        let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
        assert!(stored.is_served);
    }

    #[tokio::test]
    async fn test_mark_served_missing_is_not_found() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);

        let err = repo.mark_served(77).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_served_filter_and_counts() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);

        let a = repo.insert(&new_token(1, "A")).await.unwrap();
        repo.insert(&new_token(2, "B")).await.unwrap();
        repo.insert(&new_token(3, "C")).await.unwrap();
        repo.mark_served(a.id).await.unwrap();

        let waiting = repo.find_by_served(false).await.unwrap();
        assert_eq!(
            waiting
                .iter()
                .map(|t| t.token_number.to_string())
                .collect::<Vec<_>>(),
            vec!["T-2", "T-3"]
        );
        assert_eq!(repo.find_by_served(true).await.unwrap(), vec![
            repo.find_by_id(a.id).await.unwrap().unwrap()
        ]);

        assert_eq!(repo.count_by_served(false).await.unwrap(), 2);
        assert_eq!(repo.count_by_served(true).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_max_ticket_sequence() {
        let repo = SqliteTokenRepository::new(setup_test_db().await);
        assert_eq!(repo.max_ticket_sequence().await.unwrap(), 0);

        repo.insert(&new_token(4, "A")).await.unwrap();
        repo.insert(&new_token(9, "B")).await.unwrap();
        assert_eq!(repo.max_ticket_sequence().await.unwrap(), 9);
    }
}
