// Application Layer - Use Cases and Business Logic

pub mod patient;
pub mod token;

// Re-exports
pub use patient::PatientService;
pub use token::{QueueStats, TicketCounter, TokenService};
