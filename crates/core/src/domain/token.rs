// Token Domain Model

use crate::domain::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Token ID (store-generated)
pub type TokenId = i64;

const TICKET_PREFIX: &str = "T-";

/// Ticket number shown to the patient, rendered as `T-<n>` with `n >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TicketNumber(u64);

impl TicketNumber {
    /// First ticket issued on an empty queue
    pub const FIRST: TicketNumber = TicketNumber(1);

    pub fn new(sequence: u64) -> Result<Self> {
        if sequence == 0 {
            return Err(DomainError::TicketOutOfRange(0));
        }
        Ok(Self(sequence))
    }

    pub fn sequence(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for TicketNumber {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .ok()
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or(DomainError::TicketOutOfRange(value))
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TICKET_PREFIX, self.0)
    }
}

impl FromStr for TicketNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        // Canonical digits only: no sign, no leading zeros
        s.strip_prefix(TICKET_PREFIX)
            .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
            .filter(|digits| !digits.starts_with('0'))
            .and_then(|digits| digits.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidTicketLabel(s.to_string()))
    }
}

impl Serialize for TicketNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TicketNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// A ticket that has been numbered but not yet persisted.
/// Always enters the store in the waiting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    pub token_number: TicketNumber,
    pub user_name: String,
    pub date_time: DateTime<Utc>,
}

impl NewToken {
    pub fn issue(token_number: TicketNumber, user_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token_number,
            user_name: user_name.into(),
            date_time: now,
        }
    }
}

/// Token Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: TokenId,
    pub token_number: TicketNumber,
    pub user_name: String,
    pub is_served: bool,
    /// Issuance time; not touched when the token is served.
    pub date_time: DateTime<Utc>,
}

/// Result of a serve request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeOutcome {
    /// The token moved from waiting to served.
    Served(Token),
    /// The token was already served; nothing was written.
    AlreadyServed(Token),
}

impl ServeOutcome {
    pub fn token(&self) -> &Token {
        match self {
            ServeOutcome::Served(token) | ServeOutcome::AlreadyServed(token) => token,
        }
    }

    pub fn into_token(self) -> Token {
        match self {
            ServeOutcome::Served(token) | ServeOutcome::AlreadyServed(token) => token,
        }
    }

    pub fn was_already_served(&self) -> bool {
        matches!(self, ServeOutcome::AlreadyServed(_))
    }
}
