//! Payment report routes.
//!
//! `POST /pagos/reportar` carries two actions selected by `accion`:
//! `preparar` returns what the form needs, `enviar` submits a report.

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use condo_core::payment::{
    AllocationDetail, AllocationRequest, EvidenceUpload, InstrumentRequest, PaymentReport,
    ReportStatus, SubmissionReceipt, SubmitPaymentInput,
};
use condo_shared::types::{
    ChargeId, CondominiumId, CurrencyId, PropertyId, ReportId, UserId,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::extractors::{ApiJson, ClientMeta};
use crate::middleware::AuthUser;
use crate::response::Success;
use crate::{ApiError, AppState};

/// Creates the payment report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pagos/reportar", post(report_payment))
        .route("/pagos", get(list_reports))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `POST /pagos/reportar`.
#[derive(Debug, Deserialize)]
#[serde(tag = "accion", rename_all = "lowercase")]
pub enum ReportRequest {
    /// Fetch accounts, credits and pending charges.
    Preparar(PrepareRequest),
    /// Submit a payment report.
    Enviar(SubmitRequest),
}

/// Fields of the `preparar` action.
#[derive(Debug, Deserialize)]
pub struct PrepareRequest {
    /// Property ID.
    pub id_inmueble: i64,
}

/// One allocation as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationBody {
    /// Charge ID.
    pub id_notificacion: i64,
    /// Amount applied, in the charge currency.
    pub abono: Decimal,
    /// Optional client-side rate.
    #[serde(default)]
    pub tasa: Option<Decimal>,
}

/// One payment instrument as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentBody {
    /// Amount tendered.
    pub monto: Decimal,
    /// Currency of the amount.
    pub id_moneda: i64,
    /// Optional client-side rate.
    #[serde(default)]
    pub tasa: Option<Decimal>,
}

/// Fields of the `enviar` action.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Property ID.
    pub id_inmueble: i64,
    /// Date the payment was made.
    pub fecha_pago: NaiveDate,
    /// Free-text note.
    #[serde(default)]
    pub observacion: Option<String>,
    /// Allocations, as a JSON array or a string holding one.
    #[serde(deserialize_with = "list_or_encoded")]
    pub notificaciones: Vec<AllocationBody>,
    /// Instruments, as a JSON array or a string holding one.
    #[serde(deserialize_with = "list_or_encoded")]
    pub pagos: Vec<InstrumentBody>,
    /// Idempotency key. Blank means absent.
    #[serde(default)]
    pub client_uuid: Option<String>,
    /// Base64 evidence file, optionally as a data URI.
    #[serde(default)]
    pub evidencia_base64: Option<String>,
    /// Evidence file extension.
    #[serde(default)]
    pub evidencia_ext: Option<String>,
}

/// Older clients send the lists JSON-encoded inside a string.
fn list_or_encoded<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        List(Vec<T>),
        Encoded(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::List(items) => Ok(items),
        Raw::Encoded(text) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
    }
}

impl SubmitRequest {
    /// Convert into the engine command.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed key or evidence without an
    /// extension.
    pub fn into_input(self, meta: ClientMeta) -> Result<SubmitPaymentInput, ApiError> {
        let client_uuid = match self.client_uuid.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Uuid::parse_str(raw).map_err(|_| ApiError::validation("client_uuid invalido."))?,
            ),
        };

        let evidence = match self.evidencia_base64.filter(|c| !c.trim().is_empty()) {
            None => None,
            Some(content_base64) => {
                let extension = self
                    .evidencia_ext
                    .filter(|e| !e.trim().is_empty())
                    .ok_or_else(|| ApiError::validation("evidencia_ext requerido."))?;
                Some(EvidenceUpload {
                    content_base64,
                    extension,
                })
            }
        };

        Ok(SubmitPaymentInput {
            property_id: PropertyId::new(self.id_inmueble),
            payment_date: self.fecha_pago,
            note: self.observacion,
            allocations: self
                .notificaciones
                .into_iter()
                .map(|n| AllocationRequest {
                    charge_id: ChargeId::new(n.id_notificacion),
                    amount: n.abono,
                    rate: n.tasa,
                })
                .collect(),
            instruments: self
                .pagos
                .into_iter()
                .map(|p| InstrumentRequest {
                    amount: p.monto,
                    currency_id: CurrencyId::new(p.id_moneda),
                    rate: p.tasa,
                })
                .collect(),
            client_uuid,
            evidence,
            metadata: meta.into(),
        })
    }
}

/// Response of the `enviar` action.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// Human-readable outcome.
    pub message: &'static str,
    /// Report ID.
    pub id: ReportId,
    /// Review state.
    pub estado: ReportStatus,
    /// Idempotency key the report is stored under.
    pub client_uuid: Uuid,
    /// Total tendered, in the base currency.
    pub total_base: Decimal,
    /// Base currency.
    pub moneda_base: CurrencyId,
    /// True when the key was already stored.
    pub duplicado: bool,
    /// True when the client sent no key.
    pub uuid_generado_servidor: bool,
    /// Whether the instruments settle the allocated charges entirely.
    pub cubre_total_estimado: bool,
    /// Public evidence URL.
    pub evidencia_url: Option<String>,
}

impl From<SubmissionReceipt> for SubmitResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        let report = receipt.report;
        Self {
            message: if receipt.duplicate {
                "Pago ya reportado."
            } else {
                "Pago reportado para validacion."
            },
            id: report.id,
            estado: report.status,
            client_uuid: report.client_uuid,
            total_base: report.total_base,
            moneda_base: report.base_currency_id,
            duplicado: receipt.duplicate,
            uuid_generado_servidor: receipt.server_generated_key,
            cubre_total_estimado: receipt.covers_outstanding,
            evidencia_url: report.evidence_url,
        }
    }
}

/// Query of `GET /pagos`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to one property. Blank means all.
    #[serde(default)]
    pub id_inmueble: Option<String>,
}

/// One report as listed to its owner.
#[derive(Debug, Serialize)]
pub struct ReportView {
    /// Report ID.
    pub id: ReportId,
    /// Submitting user.
    pub id_usuario: UserId,
    /// Property.
    pub id_inmueble: PropertyId,
    /// Condominium.
    pub id_condominio: CondominiumId,
    /// Payment date.
    pub fecha_pago: NaiveDate,
    /// Note.
    pub observacion: Option<String>,
    /// Total tendered, in the base currency.
    pub total_base: Decimal,
    /// Base currency.
    pub moneda_base: CurrencyId,
    /// Review state.
    pub estado: ReportStatus,
    /// Rejection reason.
    pub motivo_rechazo: Option<String>,
    /// Public evidence URL.
    pub evidencia_url: Option<String>,
    /// Evidence storage path.
    pub evidencia_path: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Approval time.
    pub aprobado_at: Option<DateTime<Utc>>,
    /// Rejection time.
    pub rechazado_at: Option<DateTime<Utc>>,
    /// Idempotency key.
    pub client_uuid: Uuid,
    /// Allocation detail as stored.
    pub detalle: Option<AllocationDetail>,
    /// Allocated total, in base.
    pub abono_total_base: Option<Decimal>,
    /// Tendered total, in base.
    pub pagos_total_base: Option<Decimal>,
    /// Outstanding total at submission, in base.
    pub pendiente_total_base: Option<Decimal>,
    /// Whether the payment covered the outstanding total.
    pub cubre_total_estimado: Option<bool>,
}

impl From<PaymentReport> for ReportView {
    fn from(report: PaymentReport) -> Self {
        let totals = report.totals();
        Self {
            id: report.id,
            id_usuario: report.user_id,
            id_inmueble: report.property_id,
            id_condominio: report.condominium_id,
            fecha_pago: report.payment_date,
            observacion: report.note,
            total_base: report.total_base,
            moneda_base: report.base_currency_id,
            estado: report.status,
            motivo_rechazo: report.rejection_reason,
            evidencia_url: report.evidence_url,
            evidencia_path: report.evidence_path,
            created_at: report.created_at,
            aprobado_at: report.approved_at,
            rechazado_at: report.rejected_at,
            client_uuid: report.client_uuid,
            detalle: report.detail,
            abono_total_base: totals.abono_total_base,
            pagos_total_base: totals.pagos_total_base,
            pendiente_total_base: totals.pendiente_total_base,
            cubre_total_estimado: totals.cubre_total_estimado,
        }
    }
}

/// Response of `GET /pagos`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Reports, newest first.
    pub pagos: Vec<ReportView>,
}

fn parse_property_filter(raw: Option<&str>) -> Result<Option<PropertyId>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(|id| Some(PropertyId::new(id)))
            .map_err(|_| ApiError::validation("id_inmueble invalido.")),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/pagos/reportar`
async fn report_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    meta: ClientMeta,
    ApiJson(body): ApiJson<ReportRequest>,
) -> Result<Response, ApiError> {
    let engine = state.payments();

    match body {
        ReportRequest::Preparar(request) => {
            let prepared = engine
                .prepare(auth.user_id(), PropertyId::new(request.id_inmueble))
                .await?;
            Ok(Success::new(prepared).into_response())
        }
        ReportRequest::Enviar(request) => {
            let input = request.into_input(meta)?;
            let receipt = engine.submit(auth.user_id(), input).await?;
            Ok(Success::new(SubmitResponse::from(receipt)).into_response())
        }
    }
}

/// GET `/pagos?id_inmueble=`
async fn list_reports(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Success<ListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let property_id = parse_property_filter(query.id_inmueble.as_deref())?;

    let reports = state
        .payments()
        .list_reports(auth.user_id(), property_id)
        .await?;

    Ok(Success::new(ListResponse {
        pagos: reports.into_iter().map(ReportView::from).collect(),
    }))
}
