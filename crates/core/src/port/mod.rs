// Port Layer - Interfaces for external dependencies

pub mod patient_repository;
pub mod time_provider;
pub mod token_repository;

// Re-exports
pub use patient_repository::PatientRepository;
pub use time_provider::TimeProvider;
pub use token_repository::TokenRepository;
