//! Debt summary and payment history per property.

mod aggregator;
mod service;

pub use aggregator::{DebtAggregator, DebtSummary, HISTORY_LIMIT, HistoryEntry};
pub use service::{PropertyDebtService, PropertyWithDebt};
