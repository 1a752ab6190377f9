// QFlow Infrastructure - SQLite Adapter
// Implements: PatientRepository, TokenRepository

mod connection;
mod error;
mod migration;
mod patient_repository;
mod token_repository;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use patient_repository::SqlitePatientRepository;
pub use token_repository::SqliteTokenRepository;

// Note: sqlx::Error conversion is handled by map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
