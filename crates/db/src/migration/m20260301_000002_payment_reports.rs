//! Payment reports migration.
//!
//! Creates the table that stores owner-submitted payment reports and their
//! review state.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PAGO_REPORTADO_APP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS pago_reportado_app CASCADE;")
            .await?;
        Ok(())
    }
}

const PAGO_REPORTADO_APP_SQL: &str = r"
CREATE TABLE pago_reportado_app (
    id BIGSERIAL PRIMARY KEY,
    id_usuario BIGINT NOT NULL,
    id_inmueble BIGINT NOT NULL REFERENCES inmueble(id_inmueble),
    id_condominio BIGINT NOT NULL REFERENCES condominio(id_condominio),
    fecha_pago DATE NOT NULL,
    observacion TEXT,
    total_base NUMERIC(18, 2) NOT NULL,
    moneda_base BIGINT NOT NULL REFERENCES moneda(id_moneda),
    detalle JSONB NOT NULL,
    estado VARCHAR(20) NOT NULL DEFAULT 'EN_PROCESO',
    motivo_rechazo TEXT,
    client_uuid UUID NOT NULL,
    evidencia_path TEXT,
    evidencia_url TEXT,
    ip VARCHAR(45),
    user_agent TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    aprobado_at TIMESTAMPTZ,
    rechazado_at TIMESTAMPTZ,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_pra_estado CHECK (estado IN ('EN_PROCESO', 'APROBADO', 'RECHAZADO')),
    CONSTRAINT chk_pra_total_positive CHECK (total_base > 0),
    -- Exactly one decision timestamp in a terminal state, reason only when rejected
    CONSTRAINT chk_pra_review_state CHECK (
        (estado = 'EN_PROCESO' AND aprobado_at IS NULL AND rechazado_at IS NULL AND motivo_rechazo IS NULL)
        OR (estado = 'APROBADO' AND aprobado_at IS NOT NULL AND rechazado_at IS NULL AND motivo_rechazo IS NULL)
        OR (estado = 'RECHAZADO' AND rechazado_at IS NOT NULL AND aprobado_at IS NULL AND motivo_rechazo IS NOT NULL)
    )
);

-- Idempotency key: the authoritative duplicate guard
CREATE UNIQUE INDEX idx_pra_client_uuid ON pago_reportado_app(client_uuid);

-- Review queues
CREATE INDEX idx_pra_estado ON pago_reportado_app(estado);

-- Owner history, newest first
CREATE INDEX idx_pra_user_created ON pago_reportado_app(id_usuario, created_at DESC);
";
