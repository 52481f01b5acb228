//! In-memory repository doubles for unit tests.

#![allow(clippy::unwrap_used, clippy::too_many_arguments)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use condo_shared::types::{
    AccountId, ChargeId, CondominiumId, CurrencyId, PropertyId, ReportId, UserId,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::charge::{Charge, ChargeRepository};
use crate::currency::RateRepository;
use crate::payment::{
    CreditBalance, FundingRepository, InsertOutcome, NewPaymentReport, PaymentAccount,
    PaymentReport, PaymentReportRepository, ReportStatus,
};
use crate::property::{Property, PropertyRepository};
use crate::review::{ReviewDecision, ReviewRepository};
use crate::storage::{BlobStore, StorageError, public_url_for};
use crate::store::StoreError;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Every repository trait over `Mutex`-guarded collections.
#[derive(Default)]
pub struct InMemoryLedger {
    rates: Mutex<Vec<(CurrencyId, CurrencyId, Decimal, NaiveDate)>>,
    properties: Mutex<HashMap<PropertyId, Property>>,
    co_owners: Mutex<HashSet<(PropertyId, UserId)>>,
    charges: Mutex<Vec<Charge>>,
    accounts: Mutex<Vec<(CondominiumId, PaymentAccount)>>,
    credits: Mutex<Vec<(PropertyId, CreditBalance)>>,
    reports: Mutex<Vec<PaymentReport>>,
    hide_next_lookup: Mutex<bool>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rate(&self, from: i64, to: i64, rate: Decimal, effective: &str) {
        self.rates.lock().unwrap().push((
            CurrencyId::new(from),
            CurrencyId::new(to),
            rate,
            date(effective),
        ));
    }

    pub fn add_property(&self, id: i64, condominium: i64, owner: Option<i64>, base_currency: i64) {
        let property = Property::new(
            PropertyId::new(id),
            CondominiumId::new(condominium),
            owner.map(UserId::new),
            CurrencyId::new(base_currency),
        );
        self.properties
            .lock()
            .unwrap()
            .insert(property.id, property);
    }

    pub fn add_co_owner(&self, property: i64, user: i64) {
        self.co_owners
            .lock()
            .unwrap()
            .insert((PropertyId::new(property), UserId::new(user)));
    }

    pub fn add_charge(
        &self,
        id: i64,
        property: i64,
        issued_on: &str,
        currency: i64,
        total: Decimal,
        paid: Decimal,
        payable_override: Option<Decimal>,
        state: &str,
    ) {
        self.charges.lock().unwrap().push(Charge {
            id: ChargeId::new(id),
            property_id: PropertyId::new(property),
            description: Some(format!("Cuota {id}")),
            issued_on: date(issued_on),
            currency_id: CurrencyId::new(currency),
            currency_code: format!("M{currency}"),
            total,
            paid,
            payable_override,
            state: state.to_string(),
        });
    }

    pub fn add_account(&self, id: i64, condominium: i64, bank: &str, name: &str, currency: i64) {
        self.accounts.lock().unwrap().push((
            CondominiumId::new(condominium),
            PaymentAccount {
                id: AccountId::new(id),
                name: name.to_string(),
                kind: Some("transferencia".to_string()),
                bank: Some(bank.to_string()),
                currency_code: format!("M{currency}"),
                currency_id: CurrencyId::new(currency),
                account_number: None,
                bank_code: None,
                holder: None,
                rif: None,
                phone: None,
            },
        ));
    }

    pub fn add_credit(&self, property: i64, currency: i64, balance: Decimal) {
        self.credits.lock().unwrap().push((
            PropertyId::new(property),
            CreditBalance {
                currency_id: CurrencyId::new(currency),
                currency_code: format!("M{currency}"),
                balance,
            },
        ));
    }

    /// Seed a report directly, bypassing validation.
    pub fn add_report_in_state(&self, id: i64, status: ReportStatus) {
        let now = Utc::now();
        self.reports.lock().unwrap().push(PaymentReport {
            id: ReportId::new(id),
            user_id: UserId::new(1),
            property_id: PropertyId::new(1),
            condominium_id: CondominiumId::new(1),
            payment_date: date("2026-01-01"),
            note: None,
            total_base: Decimal::ONE_HUNDRED,
            base_currency_id: CurrencyId::new(1),
            detail: None,
            status,
            rejection_reason: None,
            client_uuid: Uuid::new_v4(),
            evidence_path: None,
            evidence_url: None,
            ip: None,
            user_agent: None,
            created_at: now,
            approved_at: None,
            rejected_at: None,
            updated_at: now,
        });
    }

    /// Make the next idempotency pre-check miss, as if a concurrent request
    /// inserted the key right after it ran.
    pub fn hide_next_lookup(&self) {
        *self.hide_next_lookup.lock().unwrap() = true;
    }

    pub fn report(&self, id: i64) -> Option<PaymentReport> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == ReportId::new(id))
            .cloned()
    }

    pub fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    pub fn set_report_owner_and_time(&self, id: i64, user: i64, created_at: DateTime<Utc>) {
        let mut reports = self.reports.lock().unwrap();
        if let Some(report) = reports.iter_mut().find(|r| r.id == ReportId::new(id)) {
            report.user_id = UserId::new(user);
            report.created_at = created_at;
        }
    }

    pub fn set_report_evidence(&self, id: i64, path: Option<&str>, url: Option<&str>) {
        let mut reports = self.reports.lock().unwrap();
        if let Some(report) = reports.iter_mut().find(|r| r.id == ReportId::new(id)) {
            report.evidence_path = path.map(str::to_string);
            report.evidence_url = url.map(str::to_string);
        }
    }
}

impl RateRepository for InMemoryLedger {
    async fn latest_rate(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<Option<Decimal>, StoreError> {
        Ok(self
            .rates
            .lock()
            .unwrap()
            .iter()
            .filter(|(f, t, _, _)| *f == from && *t == to)
            .max_by_key(|(_, _, _, effective)| *effective)
            .map(|(_, _, rate, _)| *rate))
    }
}

impl PropertyRepository for InMemoryLedger {
    async fn find_accessible(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<Option<Property>, StoreError> {
        let co_owned = self
            .co_owners
            .lock()
            .unwrap()
            .contains(&(property_id, user_id));
        Ok(self
            .properties
            .lock()
            .unwrap()
            .get(&property_id)
            .filter(|p| p.owner_id == Some(user_id) || co_owned)
            .cloned())
    }

    async fn list_accessible(&self, user_id: UserId) -> Result<Vec<Property>, StoreError> {
        let co_owners = self.co_owners.lock().unwrap();
        let mut properties: Vec<Property> = self
            .properties
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.owner_id == Some(user_id) || co_owners.contains(&(p.id, user_id)))
            .cloned()
            .collect();
        properties.sort_by_key(|p| p.id);
        Ok(properties)
    }
}

impl ChargeRepository for InMemoryLedger {
    async fn charges_for_property(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<Charge>, StoreError> {
        Ok(self
            .charges
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.property_id == property_id)
            .cloned()
            .collect())
    }

    async fn charges_for_properties(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<Charge>, StoreError> {
        Ok(self
            .charges
            .lock()
            .unwrap()
            .iter()
            .filter(|c| property_ids.contains(&c.property_id))
            .cloned()
            .collect())
    }
}

impl FundingRepository for InMemoryLedger {
    async fn payment_accounts(
        &self,
        condominium_id: CondominiumId,
    ) -> Result<Vec<PaymentAccount>, StoreError> {
        let mut accounts: Vec<PaymentAccount> = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(condo, _)| *condo == condominium_id)
            .map(|(_, account)| account.clone())
            .collect();
        accounts.sort_by(|a, b| a.bank.cmp(&b.bank).then(a.name.cmp(&b.name)));
        Ok(accounts)
    }

    async fn credit_balances(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<CreditBalance>, StoreError> {
        let mut credits: Vec<CreditBalance> = self
            .credits
            .lock()
            .unwrap()
            .iter()
            .filter(|(property, credit)| *property == property_id && credit.balance > Decimal::ZERO)
            .map(|(_, credit)| credit.clone())
            .collect();
        credits.sort_by(|a, b| a.currency_code.cmp(&b.currency_code));
        Ok(credits)
    }
}

impl PaymentReportRepository for InMemoryLedger {
    async fn find_by_client_uuid(
        &self,
        client_uuid: Uuid,
    ) -> Result<Option<PaymentReport>, StoreError> {
        {
            let mut hide = self.hide_next_lookup.lock().unwrap();
            if *hide {
                *hide = false;
                return Ok(None);
            }
        }
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.client_uuid == client_uuid)
            .cloned())
    }

    async fn insert_report(&self, report: NewPaymentReport) -> Result<InsertOutcome, StoreError> {
        let mut reports = self.reports.lock().unwrap();
        if reports.iter().any(|r| r.client_uuid == report.client_uuid) {
            return Ok(InsertOutcome::DuplicateKey);
        }

        let now = Utc::now();
        let next_id = reports.iter().map(|r| r.id.get()).max().unwrap_or(0) + 1;
        let stored = PaymentReport {
            id: ReportId::new(next_id),
            user_id: report.user_id,
            property_id: report.property_id,
            condominium_id: report.condominium_id,
            payment_date: report.payment_date,
            note: report.note,
            total_base: report.total_base,
            base_currency_id: report.base_currency_id,
            detail: Some(report.detail),
            status: ReportStatus::EnProceso,
            rejection_reason: None,
            client_uuid: report.client_uuid,
            evidence_path: report.evidence_path,
            evidence_url: report.evidence_url,
            ip: report.ip,
            user_agent: report.user_agent,
            created_at: now,
            approved_at: None,
            rejected_at: None,
            updated_at: now,
        };
        reports.push(stored.clone());
        Ok(InsertOutcome::Created(stored))
    }

    async fn list_reports(
        &self,
        user_id: UserId,
        property_id: Option<PropertyId>,
        limit: u64,
    ) -> Result<Vec<PaymentReport>, StoreError> {
        let mut reports: Vec<PaymentReport> = self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| property_id.is_none_or(|p| r.property_id == p))
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        reports.truncate(usize::try_from(limit).unwrap());
        Ok(reports)
    }
}

impl ReviewRepository for InMemoryLedger {
    async fn report_status(&self, report_id: ReportId) -> Result<Option<ReportStatus>, StoreError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == report_id)
            .map(|r| r.status))
    }

    async fn apply_decision(
        &self,
        report_id: ReportId,
        decision: &ReviewDecision,
        decided_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut reports = self.reports.lock().unwrap();
        let Some(report) = reports
            .iter_mut()
            .find(|r| r.id == report_id && r.status == ReportStatus::EnProceso)
        else {
            return Ok(0);
        };

        report.status = decision.target_status();
        report.updated_at = decided_at;
        match decision {
            ReviewDecision::Approve => {
                report.approved_at = Some(decided_at);
                report.rejected_at = None;
                report.rejection_reason = None;
            }
            ReviewDecision::Reject { reason } => {
                report.rejected_at = Some(decided_at);
                report.approved_at = None;
                report.rejection_reason = Some(reason.clone());
            }
        }
        Ok(1)
    }
}

/// Blob store keeping objects in a map.
pub struct InMemoryBlobs {
    base_url: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobs {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

impl BlobStore for InMemoryBlobs {
    async fn store(&self, key: &str, bytes: Vec<u8>) -> Result<String, StorageError> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(key.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        public_url_for(&self.base_url, path)
    }
}
