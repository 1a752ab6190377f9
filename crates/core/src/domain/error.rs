// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid ticket label: {0:?} (expected \"T-<n>\")")]
    InvalidTicketLabel(String),

    #[error("Ticket number out of range: {0}")]
    TicketOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, DomainError>;
