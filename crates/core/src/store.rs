//! Persistence boundary shared by the domain services.

use condo_shared::AppError;
use thiserror::Error;

use crate::charge::ChargeRepository;
use crate::currency::RateRepository;
use crate::payment::{FundingRepository, PaymentReportRepository};
use crate::property::PropertyRepository;
use crate::review::ReviewRepository;

/// Failure reported by a repository implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store failed or returned unreadable data.
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend error.
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Database(err.to_string())
    }
}

/// Every repository the payment workflow reads from or writes to.
///
/// The db crate implements all of them on a single connection-backed type;
/// services that need several of them take one `Arc<L: PropertyLedger>`.
pub trait PropertyLedger:
    RateRepository
    + PropertyRepository
    + ChargeRepository
    + FundingRepository
    + PaymentReportRepository
    + ReviewRepository
{
}

impl<T> PropertyLedger for T where
    T: RateRepository
        + PropertyRepository
        + ChargeRepository
        + FundingRepository
        + PaymentReportRepository
        + ReviewRepository
{
}
