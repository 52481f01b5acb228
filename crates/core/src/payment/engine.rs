//! Payment report preparation and submission.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use condo_shared::types::{PropertyId, UserId, exceeds_with_tolerance};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::PaymentError;
use super::evidence::{EvidencePolicy, evidence_key};
use super::repository::InsertOutcome;
use super::summary::TotalsAccumulator;
use super::types::{
    AllocationDetail, AllocationLine, InstrumentLine, NewPaymentReport, PaymentReport,
    PreparedPayment, Rated, SubmissionReceipt, SubmitPaymentInput,
};
use crate::charge::{PendingCharge, PendingChargeLedger};
use crate::currency::{RateResolver, round_money};
use crate::property::PropertyAccessGuard;
use crate::storage::BlobStore;
use crate::store::{PropertyLedger, StoreError};

/// Maximum number of reports returned by a listing.
pub const REPORT_LIST_LIMIT: u64 = 100;

/// Largest allocation or instrument amount accepted (10^13).
pub const MAX_LINE_AMOUNT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);

/// Largest client-supplied rate accepted (10^12).
pub const MAX_CLIENT_RATE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest base total the report table can hold, `NUMERIC(18, 2)`.
pub const MAX_TOTAL_BASE: Decimal =
    Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, 2);

/// Validates, totals and persists payment reports.
pub struct PaymentSubmissionEngine<L: PropertyLedger, B: BlobStore> {
    ledger: Arc<L>,
    blobs: Arc<B>,
    guard: PropertyAccessGuard<L>,
    pending: PendingChargeLedger<L>,
    rates: RateResolver<L>,
    policy: EvidencePolicy,
}

impl<L: PropertyLedger, B: BlobStore> PaymentSubmissionEngine<L, B> {
    /// Create a new submission engine.
    #[must_use]
    pub fn new(ledger: Arc<L>, blobs: Arc<B>, policy: EvidencePolicy) -> Self {
        Self {
            guard: PropertyAccessGuard::new(Arc::clone(&ledger)),
            pending: PendingChargeLedger::new(Arc::clone(&ledger)),
            rates: RateResolver::new(Arc::clone(&ledger)),
            ledger,
            blobs,
            policy,
        }
    }

    /// Gather accounts, credits and pending charges for a property.
    ///
    /// Read-only.
    ///
    /// # Errors
    ///
    /// Returns `PropertyNotFound` if the user has no claim on the property.
    pub async fn prepare(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<PreparedPayment, PaymentError> {
        let property = self.guard.authorize(user_id, property_id).await?;
        let base = property.base_currency_id;

        let mut accounts = Vec::new();
        for account in self.ledger.payment_accounts(property.condominium_id).await? {
            let rate = self.rates.resolve(account.currency_id, base).await?;
            accounts.push(Rated {
                item: account,
                rate,
            });
        }

        let mut credits = Vec::new();
        for credit in self.ledger.credit_balances(property.id).await? {
            let rate = self.rates.resolve(credit.currency_id, base).await?;
            credits.push(Rated { item: credit, rate });
        }

        let pending = self.pending.list_pending(property.id, base).await?;

        debug!(
            user_id = %user_id,
            property_id = %property_id,
            accounts = accounts.len(),
            credits = credits.len(),
            pending = pending.len(),
            "Prepared payment report"
        );

        Ok(PreparedPayment {
            base_currency_id: base,
            accounts,
            credits,
            pending,
        })
    }

    /// Validate and store a payment report.
    ///
    /// Replaying a stored idempotency key returns the original report with
    /// `duplicate = true`. Nothing is written unless every allocation and
    /// instrument validates; the evidence upload is the only write that
    /// precedes the insert, and it is keyed by the idempotency key.
    ///
    /// # Errors
    ///
    /// Returns a validation error for inconsistent submissions,
    /// `PropertyNotFound` for foreign properties, and store or storage errors
    /// when a backend fails.
    pub async fn submit(
        &self,
        user_id: UserId,
        input: SubmitPaymentInput,
    ) -> Result<SubmissionReceipt, PaymentError> {
        let property = self.guard.authorize(user_id, input.property_id).await?;
        let base = property.base_currency_id;

        let (client_uuid, server_generated_key) = match input.client_uuid {
            Some(key) => (key, false),
            None => (Uuid::new_v4(), true),
        };

        if !server_generated_key
            && let Some(existing) = self.ledger.find_by_client_uuid(client_uuid).await?
        {
            return Self::replay(user_id, existing);
        }

        if input.allocations.is_empty() {
            return Err(PaymentError::NoAllocations);
        }
        if input.instruments.is_empty() {
            return Err(PaymentError::NoInstruments);
        }

        let pending = self.pending.list_pending(property.id, base).await?;
        let index: HashMap<_, &PendingCharge> =
            pending.iter().map(|p| (p.charge_id, p)).collect();

        let mut totals = TotalsAccumulator::new();
        let mut seen = HashSet::new();
        let mut allocations = Vec::with_capacity(input.allocations.len());
        for request in &input.allocations {
            if !request.charge_id.is_valid() || request.amount <= Decimal::ZERO {
                return Err(PaymentError::InvalidAllocation(request.charge_id));
            }
            if !seen.insert(request.charge_id) {
                return Err(PaymentError::DuplicateAllocation(request.charge_id));
            }
            let charge = index
                .get(&request.charge_id)
                .ok_or(PaymentError::UnknownCharge(request.charge_id))?;
            if exceeds_with_tolerance(request.amount, charge.remaining) {
                return Err(PaymentError::AllocationExceedsBalance(request.charge_id));
            }

            let client_rate = client_rate(request.rate)?;
            if request.amount > MAX_LINE_AMOUNT {
                return Err(PaymentError::AmountOutOfRange);
            }
            let rate = client_rate.unwrap_or(charge.rate);
            totals.add_allocation(request.amount, rate, charge.remaining)?;
            allocations.push(AllocationLine {
                charge_id: request.charge_id,
                amount: request.amount,
                rate: Some(rate),
            });
        }

        let mut instruments = Vec::with_capacity(input.instruments.len());
        for request in &input.instruments {
            if request.amount <= Decimal::ZERO || !request.currency_id.is_valid() {
                return Err(PaymentError::InvalidInstrument);
            }
            if request.amount > MAX_LINE_AMOUNT {
                return Err(PaymentError::AmountOutOfRange);
            }
            let rate = match client_rate(request.rate)? {
                Some(rate) => rate,
                None => self.rates.resolve(request.currency_id, base).await?,
            };
            totals.add_instrument(request.amount, rate)?;
            instruments.push(InstrumentLine {
                amount: request.amount,
                currency_id: request.currency_id,
                rate: Some(rate),
            });
        }

        if !totals.covers_allocations() {
            return Err(PaymentError::Underpaid {
                tendered: totals.tendered(),
                allocated: totals.allocated(),
            });
        }

        let total_base = round_money(totals.tendered());
        if total_base <= Decimal::ZERO || total_base > MAX_TOTAL_BASE {
            return Err(PaymentError::TotalOutOfRange(total_base));
        }

        let decoded = input
            .evidence
            .as_ref()
            .map(|upload| self.policy.decode(upload))
            .transpose()?;

        let (evidence_path, evidence_url) = match decoded {
            Some(evidence) => {
                let key = evidence_key(client_uuid, &evidence.extension);
                let path = self.blobs.store(&key, evidence.bytes).await?;
                let url = self.blobs.public_url(&path);
                (Some(path), Some(url))
            }
            None => (None, None),
        };

        let note = input.note.as_deref().map(str::trim).unwrap_or_default();
        let summary = totals.summary();
        let covers_outstanding = summary.cubre_total_estimado;
        let new_report = NewPaymentReport {
            user_id,
            property_id: property.id,
            condominium_id: property.condominium_id,
            payment_date: input.payment_date,
            note: (!note.is_empty()).then(|| note.to_string()),
            total_base,
            base_currency_id: base,
            detail: AllocationDetail {
                allocations,
                instruments,
                note: note.to_string(),
                summary: Some(summary),
            },
            client_uuid,
            evidence_path,
            evidence_url,
            ip: input.metadata.ip,
            user_agent: input.metadata.user_agent,
        };

        match self.ledger.insert_report(new_report).await? {
            InsertOutcome::Created(report) => {
                info!(
                    report_id = %report.id,
                    user_id = %user_id,
                    property_id = %report.property_id,
                    client_uuid = %client_uuid,
                    total_base = %report.total_base,
                    "Payment report submitted"
                );
                Ok(SubmissionReceipt {
                    report,
                    duplicate: false,
                    server_generated_key,
                    covers_outstanding,
                })
            }
            InsertOutcome::DuplicateKey => {
                warn!(client_uuid = %client_uuid, "Concurrent submission with the same key");
                let existing = self
                    .ledger
                    .find_by_client_uuid(client_uuid)
                    .await?
                    .ok_or_else(|| {
                        StoreError::backend(format!(
                            "report {client_uuid} vanished after a unique violation"
                        ))
                    })?;
                Self::replay(user_id, existing)
            }
        }
    }

    /// Reports of the user, newest first, at most `REPORT_LIST_LIMIT`.
    ///
    /// Rows that only carry an evidence path get their public URL derived
    /// from the blob store.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list_reports(
        &self,
        user_id: UserId,
        property_id: Option<PropertyId>,
    ) -> Result<Vec<PaymentReport>, PaymentError> {
        let mut reports = self
            .ledger
            .list_reports(user_id, property_id, REPORT_LIST_LIMIT)
            .await?;

        for report in &mut reports {
            if report.evidence_url.as_deref().is_none_or(str::is_empty)
                && let Some(path) = report.evidence_path.as_deref().filter(|p| !p.is_empty())
            {
                report.evidence_url = Some(self.blobs.public_url(path));
            }
        }

        Ok(reports)
    }

    fn replay(user_id: UserId, existing: PaymentReport) -> Result<SubmissionReceipt, PaymentError> {
        if existing.user_id != user_id {
            return Err(PaymentError::KeyConflict);
        }

        info!(
            report_id = %existing.id,
            client_uuid = %existing.client_uuid,
            "Replayed payment report submission"
        );
        let covers_outstanding = existing.totals().cubre_total_estimado.unwrap_or(false);
        Ok(SubmissionReceipt {
            report: existing,
            duplicate: true,
            server_generated_key: false,
            covers_outstanding,
        })
    }
}

/// A client rate overrides the resolved one only when it is positive, and is
/// rejected above `MAX_CLIENT_RATE`.
fn client_rate(rate: Option<Decimal>) -> Result<Option<Decimal>, PaymentError> {
    match rate.filter(|r| *r > Decimal::ZERO) {
        Some(rate) if rate > MAX_CLIENT_RATE => Err(PaymentError::AmountOutOfRange),
        rate => Ok(rate),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
