//! Payment reporting domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use condo_shared::types::{
    AccountId, ChargeId, CondominiumId, CurrencyId, PropertyId, ReportId, UserId,
    covers_with_tolerance,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::charge::PendingCharge;
use crate::currency::convert_amount;

/// Review state of a payment report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    /// Waiting for staff review.
    EnProceso,
    /// Accepted by staff.
    Aprobado,
    /// Rejected by staff, with a reason.
    Rechazado,
}

impl ReportStatus {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnProceso => "EN_PROCESO",
            Self::Aprobado => "APROBADO",
            Self::Rechazado => "RECHAZADO",
        }
    }

    /// Whether the report has already been reviewed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::EnProceso)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EN_PROCESO" => Ok(Self::EnProceso),
            "APROBADO" => Ok(Self::Aprobado),
            "RECHAZADO" => Ok(Self::Rechazado),
            other => Err(format!("unknown report status '{other}'")),
        }
    }
}

/// Amount applied to one charge, as stored in the detail column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    /// Charge the amount is applied to.
    #[serde(rename = "id_notificacion")]
    pub charge_id: ChargeId,
    /// Amount applied, in the charge currency.
    #[serde(rename = "abono")]
    pub amount: Decimal,
    /// Rate to the base currency. Older rows may lack it.
    #[serde(rename = "tasa", default)]
    pub rate: Option<Decimal>,
}

/// One payment instrument, as stored in the detail column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentLine {
    /// Amount tendered, in the instrument currency.
    #[serde(rename = "monto")]
    pub amount: Decimal,
    /// Instrument currency.
    #[serde(rename = "id_moneda")]
    pub currency_id: CurrencyId,
    /// Rate to the base currency.
    #[serde(rename = "tasa", default)]
    pub rate: Option<Decimal>,
}

/// Totals computed at submission time, all in the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSummary {
    /// Sum of allocations converted to base.
    pub abono_total_base: Decimal,
    /// Sum of instruments converted to base.
    pub pagos_total_base: Decimal,
    /// Remaining balance of the allocated charges, converted to base.
    pub pendiente_total_base: Decimal,
    /// Number of allocations.
    pub notificaciones: usize,
    /// Number of instruments.
    pub pagos: usize,
    /// Whether the instruments cover the whole outstanding balance.
    pub cubre_total_estimado: bool,
}

/// JSON document stored with every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationDetail {
    /// Charge allocations, in submission order.
    #[serde(rename = "notificaciones", default)]
    pub allocations: Vec<AllocationLine>,
    /// Payment instruments, in submission order.
    #[serde(rename = "pagos", default)]
    pub instruments: Vec<InstrumentLine>,
    /// Resident note.
    #[serde(rename = "observacion", default)]
    pub note: String,
    /// Totals. Absent on rows written before totals were recorded.
    #[serde(rename = "resumen", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<DetailSummary>,
}

/// Summary figures exposed when listing reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    /// Allocated total in base.
    pub abono_total_base: Option<Decimal>,
    /// Tendered total in base.
    pub pagos_total_base: Option<Decimal>,
    /// Outstanding total at submission, in base.
    pub pendiente_total_base: Option<Decimal>,
    /// Whether the tendered total covers the outstanding total.
    pub cubre_total_estimado: Option<bool>,
}

impl AllocationDetail {
    /// Summary figures, recomputed from the allocations when the stored
    /// document has no summary block.
    ///
    /// The recomputation treats a missing or non-positive rate as 1 and
    /// reports the allocated total as the tendered total; the outstanding
    /// total cannot be recovered and stays empty.
    #[must_use]
    pub fn totals(&self) -> ReportTotals {
        if let Some(summary) = &self.summary {
            return ReportTotals {
                abono_total_base: Some(summary.abono_total_base),
                pagos_total_base: Some(summary.pagos_total_base),
                pendiente_total_base: Some(summary.pendiente_total_base),
                cubre_total_estimado: Some(covers_with_tolerance(
                    summary.pagos_total_base,
                    summary.pendiente_total_base,
                )),
            };
        }

        // Stays empty if the stored lines overflow
        let allocated = self.allocations.iter().try_fold(Decimal::ZERO, |total, line| {
            let rate = line.rate.filter(|r| *r > Decimal::ZERO).unwrap_or(Decimal::ONE);
            convert_amount(line.amount, rate).and_then(|v| total.checked_add(v))
        });

        ReportTotals {
            abono_total_base: allocated,
            pagos_total_base: allocated,
            pendiente_total_base: None,
            cubre_total_estimado: None,
        }
    }
}

/// A stored payment report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReport {
    /// Report ID.
    pub id: ReportId,
    /// Reporting user.
    pub user_id: UserId,
    /// Property the payment is for.
    pub property_id: PropertyId,
    /// Condominium of the property.
    pub condominium_id: CondominiumId,
    /// Date the resident says the payment was made.
    pub payment_date: NaiveDate,
    /// Resident note.
    pub note: Option<String>,
    /// Tendered total in the base currency, 2 decimals.
    pub total_base: Decimal,
    /// Base currency.
    pub base_currency_id: CurrencyId,
    /// Allocation detail. `None` when the column is empty or unreadable.
    pub detail: Option<AllocationDetail>,
    /// Review state.
    pub status: ReportStatus,
    /// Rejection reason, set only when rejected.
    pub rejection_reason: Option<String>,
    /// Idempotency key.
    pub client_uuid: Uuid,
    /// Evidence location in the blob store.
    pub evidence_path: Option<String>,
    /// Public evidence URL.
    pub evidence_url: Option<String>,
    /// Origin IP.
    pub ip: Option<String>,
    /// Origin user agent.
    pub user_agent: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Approval time.
    pub approved_at: Option<DateTime<Utc>>,
    /// Rejection time.
    pub rejected_at: Option<DateTime<Utc>>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl PaymentReport {
    /// Summary figures for the listing endpoint.
    #[must_use]
    pub fn totals(&self) -> ReportTotals {
        self.detail
            .as_ref()
            .map(AllocationDetail::totals)
            .unwrap_or_default()
    }
}

/// Insert payload for a new report. The store assigns ID and timestamps.
#[derive(Debug, Clone)]
pub struct NewPaymentReport {
    /// Reporting user.
    pub user_id: UserId,
    /// Property.
    pub property_id: PropertyId,
    /// Condominium.
    pub condominium_id: CondominiumId,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Resident note.
    pub note: Option<String>,
    /// Tendered total in base, 2 decimals.
    pub total_base: Decimal,
    /// Base currency.
    pub base_currency_id: CurrencyId,
    /// Allocation detail with summary.
    pub detail: AllocationDetail,
    /// Idempotency key.
    pub client_uuid: Uuid,
    /// Evidence path.
    pub evidence_path: Option<String>,
    /// Evidence public URL.
    pub evidence_url: Option<String>,
    /// Origin IP.
    pub ip: Option<String>,
    /// Origin user agent.
    pub user_agent: Option<String>,
}

/// Requested allocation of an amount to a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Charge ID.
    pub charge_id: ChargeId,
    /// Amount in the charge currency.
    pub amount: Decimal,
    /// Client-supplied rate, used only when positive.
    pub rate: Option<Decimal>,
}

/// Requested payment instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentRequest {
    /// Amount in the instrument currency.
    pub amount: Decimal,
    /// Instrument currency.
    pub currency_id: CurrencyId,
    /// Client-supplied rate, used only when positive.
    pub rate: Option<Decimal>,
}

/// Evidence file sent inline with the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    /// Base64 content, optionally with a `data:` URI prefix.
    pub content_base64: String,
    /// File extension without the dot.
    pub extension: String,
}

/// Request origin recorded with the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionMetadata {
    /// Client IP.
    pub ip: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
}

/// Typed submission command.
#[derive(Debug, Clone)]
pub struct SubmitPaymentInput {
    /// Property the payment is for.
    pub property_id: PropertyId,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Resident note.
    pub note: Option<String>,
    /// Charge allocations.
    pub allocations: Vec<AllocationRequest>,
    /// Payment instruments.
    pub instruments: Vec<InstrumentRequest>,
    /// Idempotency key. Generated by the server when absent.
    pub client_uuid: Option<Uuid>,
    /// Evidence file.
    pub evidence: Option<EvidenceUpload>,
    /// Request origin.
    pub metadata: SubmissionMetadata,
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// Stored report (new or replayed).
    pub report: PaymentReport,
    /// True when the key was already stored and the original is returned.
    pub duplicate: bool,
    /// True when the client sent no key and one was generated.
    pub server_generated_key: bool,
    /// Whether the instruments cover the outstanding total of the allocated charges.
    pub covers_outstanding: bool,
}

/// Destination account of a condominium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentAccount {
    /// Account ID.
    #[serde(rename = "id_cuenta")]
    pub id: AccountId,
    /// Account name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Account type (transfer, mobile payment, cash...).
    #[serde(rename = "tipo")]
    pub kind: Option<String>,
    /// Bank name.
    #[serde(rename = "banco")]
    pub bank: Option<String>,
    /// Currency code.
    #[serde(rename = "moneda")]
    pub currency_code: String,
    /// Currency.
    #[serde(rename = "id_moneda")]
    pub currency_id: CurrencyId,
    /// Account number.
    #[serde(rename = "numero_cuenta_cliente")]
    pub account_number: Option<String>,
    /// Bank code.
    #[serde(rename = "codigo_banco")]
    pub bank_code: Option<String>,
    /// Account holder.
    #[serde(rename = "titular")]
    pub holder: Option<String>,
    /// Holder tax ID.
    pub rif: Option<String>,
    /// Phone for mobile payments.
    #[serde(rename = "celular")]
    pub phone: Option<String>,
}

/// Active credit of a property in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditBalance {
    /// Currency.
    #[serde(rename = "id_moneda")]
    pub currency_id: CurrencyId,
    /// Currency code.
    #[serde(rename = "moneda")]
    pub currency_code: String,
    /// Sum of active credits.
    #[serde(rename = "saldo_credito")]
    pub balance: Decimal,
}

/// An item paired with its rate to the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rated<T> {
    /// The item.
    #[serde(flatten)]
    pub item: T,
    /// Rate to the base currency.
    #[serde(rename = "tasa")]
    pub rate: Decimal,
}

/// Everything the client needs to build a payment report.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedPayment {
    /// Base currency of the property.
    #[serde(rename = "moneda_base")]
    pub base_currency_id: CurrencyId,
    /// Destination accounts.
    #[serde(rename = "cuentas")]
    pub accounts: Vec<Rated<PaymentAccount>>,
    /// Active credits.
    #[serde(rename = "creditos")]
    pub credits: Vec<Rated<CreditBalance>>,
    /// Pending charges.
    #[serde(rename = "pendientes")]
    pub pending: Vec<PendingCharge>,
}
