//! Repository traits for payment reporting.

use condo_shared::types::{CondominiumId, PropertyId, UserId};
use uuid::Uuid;

use super::types::{CreditBalance, NewPaymentReport, PaymentAccount, PaymentReport};
use crate::store::StoreError;

/// Outcome of inserting a report.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// Row created.
    Created(PaymentReport),
    /// The idempotency key is already stored; nothing was written.
    DuplicateKey,
}

/// Repository trait for the funding options shown when preparing a report.
pub trait FundingRepository: Send + Sync {
    /// Destination accounts of a condominium, ordered by bank then name.
    fn payment_accounts(
        &self,
        condominium_id: CondominiumId,
    ) -> impl std::future::Future<Output = Result<Vec<PaymentAccount>, StoreError>> + Send;

    /// Positive sums of active credits per currency, ordered by currency code.
    fn credit_balances(
        &self,
        property_id: PropertyId,
    ) -> impl std::future::Future<Output = Result<Vec<CreditBalance>, StoreError>> + Send;
}

/// Repository trait for payment report persistence.
pub trait PaymentReportRepository: Send + Sync {
    /// Find a report by idempotency key.
    fn find_by_client_uuid(
        &self,
        client_uuid: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<PaymentReport>, StoreError>> + Send;

    /// Insert a report in `EN_PROCESO`.
    ///
    /// A unique violation on the idempotency key must surface as
    /// `InsertOutcome::DuplicateKey`, not as an error.
    fn insert_report(
        &self,
        report: NewPaymentReport,
    ) -> impl std::future::Future<Output = Result<InsertOutcome, StoreError>> + Send;

    /// Reports of a user, newest first, optionally for one property.
    fn list_reports(
        &self,
        user_id: UserId,
        property_id: Option<PropertyId>,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<PaymentReport>, StoreError>> + Send;
}
