//! Payment report persistence and review transitions.

use chrono::{DateTime, Utc};
use condo_core::StoreError;
use condo_core::payment::{
    AllocationDetail, InsertOutcome, NewPaymentReport, PaymentReport, PaymentReportRepository,
    ReportStatus,
};
use condo_core::review::{ReviewDecision, ReviewRepository};
use condo_shared::types::{CondominiumId, CurrencyId, PropertyId, ReportId, UserId};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::warn;
use uuid::Uuid;

use super::ledger::{PostgresLedger, store_err};
use crate::entities::pago_reportado_app;

impl PaymentReportRepository for PostgresLedger {
    async fn find_by_client_uuid(
        &self,
        client_uuid: Uuid,
    ) -> Result<Option<PaymentReport>, StoreError> {
        let model = pago_reportado_app::Entity::find()
            .filter(pago_reportado_app::Column::ClientUuid.eq(client_uuid))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        model.map(to_domain).transpose()
    }

    async fn insert_report(&self, report: NewPaymentReport) -> Result<InsertOutcome, StoreError> {
        let detail = serde_json::to_value(&report.detail)
            .map_err(|e| StoreError::backend(format!("cannot encode detalle: {e}")))?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        let active_model = pago_reportado_app::ActiveModel {
            id_usuario: Set(report.user_id.get()),
            id_inmueble: Set(report.property_id.get()),
            id_condominio: Set(report.condominium_id.get()),
            fecha_pago: Set(report.payment_date),
            observacion: Set(report.note),
            total_base: Set(report.total_base),
            moneda_base: Set(report.base_currency_id.get()),
            detalle: Set(detail),
            estado: Set(ReportStatus::EnProceso.as_str().to_string()),
            motivo_rechazo: Set(None),
            client_uuid: Set(report.client_uuid),
            evidencia_path: Set(report.evidence_path),
            evidencia_url: Set(report.evidence_url),
            ip: Set(report.ip),
            user_agent: Set(report.user_agent),
            created_at: Set(now),
            aprobado_at: Set(None),
            rechazado_at: Set(None),
            updated_at: Set(now),
            ..Default::default()
        };

        match active_model.insert(&self.db).await {
            Ok(model) => Ok(InsertOutcome::Created(to_domain(model)?)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(InsertOutcome::DuplicateKey)
            }
            Err(err) => Err(store_err(err)),
        }
    }

    async fn list_reports(
        &self,
        user_id: UserId,
        property_id: Option<PropertyId>,
        limit: u64,
    ) -> Result<Vec<PaymentReport>, StoreError> {
        let mut query = pago_reportado_app::Entity::find()
            .filter(pago_reportado_app::Column::IdUsuario.eq(user_id.get()));
        if let Some(property_id) = property_id {
            query = query.filter(pago_reportado_app::Column::IdInmueble.eq(property_id.get()));
        }

        let models = query
            .order_by_desc(pago_reportado_app::Column::CreatedAt)
            .order_by_desc(pago_reportado_app::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        models.into_iter().map(to_domain).collect()
    }
}

impl ReviewRepository for PostgresLedger {
    async fn report_status(&self, report_id: ReportId) -> Result<Option<ReportStatus>, StoreError> {
        let estado: Option<String> = pago_reportado_app::Entity::find_by_id(report_id.get())
            .select_only()
            .column(pago_reportado_app::Column::Estado)
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(store_err)?;

        estado.as_deref().map(parse_status).transpose()
    }

    async fn apply_decision(
        &self,
        report_id: ReportId,
        decision: &ReviewDecision,
        decided_at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let decided_at: DateTimeWithTimeZone = decided_at.into();
        let (approved_at, rejected_at) = match decision {
            ReviewDecision::Approve => (Some(decided_at), None),
            ReviewDecision::Reject { .. } => (None, Some(decided_at)),
        };

        // Only a pending report moves; zero rows means it was already decided or is missing.
        let result = pago_reportado_app::Entity::update_many()
            .col_expr(
                pago_reportado_app::Column::Estado,
                Expr::value(decision.target_status().as_str()),
            )
            .col_expr(pago_reportado_app::Column::AprobadoAt, Expr::value(approved_at))
            .col_expr(pago_reportado_app::Column::RechazadoAt, Expr::value(rejected_at))
            .col_expr(
                pago_reportado_app::Column::MotivoRechazo,
                Expr::value(decision.reason().map(str::to_string)),
            )
            .col_expr(pago_reportado_app::Column::UpdatedAt, Expr::value(decided_at))
            .filter(pago_reportado_app::Column::Id.eq(report_id.get()))
            .filter(pago_reportado_app::Column::Estado.eq(ReportStatus::EnProceso.as_str()))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected)
    }
}

fn parse_status(raw: &str) -> Result<ReportStatus, StoreError> {
    raw.parse().map_err(StoreError::backend)
}

/// Convert a database row to the domain report.
///
/// A `detalle` that does not match the current layout is logged and dropped
/// rather than failing the whole listing.
fn to_domain(model: pago_reportado_app::Model) -> Result<PaymentReport, StoreError> {
    let status = parse_status(&model.estado)?;
    let detail = match serde_json::from_value::<AllocationDetail>(model.detalle) {
        Ok(detail) => Some(detail),
        Err(e) => {
            warn!(report_id = model.id, error = %e, "Unreadable detalle on payment report");
            None
        }
    };

    Ok(PaymentReport {
        id: ReportId::new(model.id),
        user_id: UserId::new(model.id_usuario),
        property_id: PropertyId::new(model.id_inmueble),
        condominium_id: CondominiumId::new(model.id_condominio),
        payment_date: model.fecha_pago,
        note: model.observacion,
        total_base: model.total_base,
        base_currency_id: CurrencyId::new(model.moneda_base),
        detail,
        status,
        rejection_reason: model.motivo_rechazo,
        client_uuid: model.client_uuid,
        evidence_path: model.evidencia_path,
        evidence_url: model.evidencia_url,
        ip: model.ip,
        user_agent: model.user_agent,
        created_at: model.created_at.with_timezone(&Utc),
        approved_at: model.aprobado_at.map(|t| t.with_timezone(&Utc)),
        rejected_at: model.rechazado_at.map(|t| t.with_timezone(&Utc)),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
