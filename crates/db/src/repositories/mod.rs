//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod ledger;
pub mod payment_report;
pub mod token;

pub use ledger::PostgresLedger;
pub use token::TokenRepository;
