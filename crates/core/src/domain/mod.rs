// Domain Layer - Pure business logic and entities

pub mod error;
pub mod patient;
pub mod token;

// Re-exports
pub use error::DomainError;
pub use patient::{NewPatient, Patient, PatientId};
pub use token::{NewToken, ServeOutcome, TicketNumber, Token, TokenId};
