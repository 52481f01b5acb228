//! Initial database migration.
//!
//! Creates the condominium reference schema: currencies, rates, condominiums,
//! units and their owners, destination accounts, credits, charges and the
//! bearer tokens issued by the login service.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: CURRENCIES
        // ============================================================
        db.execute_unprepared(MONEDA_SQL).await?;
        db.execute_unprepared(TIPO_CAMBIO_SQL).await?;

        // ============================================================
        // PART 2: CONDOMINIUMS & UNITS
        // ============================================================
        db.execute_unprepared(CONDOMINIO_SQL).await?;
        db.execute_unprepared(INMUEBLE_SQL).await?;
        db.execute_unprepared(PROPIETARIO_INMUEBLE_SQL).await?;

        // ============================================================
        // PART 3: FUNDING
        // ============================================================
        db.execute_unprepared(CUENTA_SQL).await?;
        db.execute_unprepared(CREDITO_A_FAVOR_SQL).await?;

        // ============================================================
        // PART 4: CHARGES
        // ============================================================
        db.execute_unprepared(NOTIFICACION_COBRO_SQL).await?;

        // ============================================================
        // PART 5: AUTHENTICATION
        // ============================================================
        db.execute_unprepared(AUTH_TOKENS_SQL).await?;

        // ============================================================
        // PART 6: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_MONEDA_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const MONEDA_SQL: &str = r"
CREATE TABLE moneda (
    id_moneda BIGSERIAL PRIMARY KEY,
    codigo VARCHAR(10) NOT NULL UNIQUE,
    nombre TEXT
);
";

const TIPO_CAMBIO_SQL: &str = r"
CREATE TABLE tipo_cambio (
    id_tipo_cambio BIGSERIAL PRIMARY KEY,
    id_moneda_origen BIGINT NOT NULL REFERENCES moneda(id_moneda),
    id_moneda_destino BIGINT NOT NULL REFERENCES moneda(id_moneda),
    tasa NUMERIC(20, 8) NOT NULL,
    fecha_vigencia DATE NOT NULL
);

-- Latest rate per directed pair
CREATE INDEX idx_tipo_cambio_par ON tipo_cambio(id_moneda_origen, id_moneda_destino, fecha_vigencia DESC);
";

const CONDOMINIO_SQL: &str = r"
CREATE TABLE condominio (
    id_condominio BIGSERIAL PRIMARY KEY,
    nombre TEXT NOT NULL,
    id_moneda BIGINT NOT NULL REFERENCES moneda(id_moneda)
);
";

const INMUEBLE_SQL: &str = r"
CREATE TABLE inmueble (
    id_inmueble BIGSERIAL PRIMARY KEY,
    id_condominio BIGINT NOT NULL REFERENCES condominio(id_condominio),
    id_usuario BIGINT,
    alicuota NUMERIC(10, 6),
    estado TEXT,
    torre TEXT,
    piso TEXT,
    identificacion TEXT,
    manzana TEXT,
    calle TEXT,
    avenida TEXT,
    tipo TEXT,
    correlativo TEXT
);

CREATE INDEX idx_inmueble_usuario ON inmueble(id_usuario);
";

const PROPIETARIO_INMUEBLE_SQL: &str = r"
CREATE TABLE propietario_inmueble (
    id_inmueble BIGINT NOT NULL REFERENCES inmueble(id_inmueble) ON DELETE CASCADE,
    id_usuario BIGINT NOT NULL,
    PRIMARY KEY (id_inmueble, id_usuario)
);

CREATE INDEX idx_propietario_inmueble_usuario ON propietario_inmueble(id_usuario);
";

const CUENTA_SQL: &str = r"
CREATE TABLE cuenta (
    id_cuenta BIGSERIAL PRIMARY KEY,
    id_condominio BIGINT NOT NULL REFERENCES condominio(id_condominio),
    nombre TEXT NOT NULL,
    tipo TEXT,
    banco TEXT,
    id_moneda BIGINT NOT NULL REFERENCES moneda(id_moneda),
    numero_cuenta_cliente TEXT,
    codigo_banco TEXT,
    titular TEXT,
    rif TEXT,
    celular TEXT
);

CREATE INDEX idx_cuenta_condominio ON cuenta(id_condominio);
";

const CREDITO_A_FAVOR_SQL: &str = r"
CREATE TABLE credito_a_favor (
    id_credito BIGSERIAL PRIMARY KEY,
    id_inmueble BIGINT NOT NULL REFERENCES inmueble(id_inmueble),
    id_moneda BIGINT NOT NULL REFERENCES moneda(id_moneda),
    monto NUMERIC(18, 2) NOT NULL,
    estado VARCHAR(20) NOT NULL DEFAULT 'activo',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_credito_inmueble ON credito_a_favor(id_inmueble) WHERE estado = 'activo';
";

const NOTIFICACION_COBRO_SQL: &str = r"
CREATE TABLE notificacion_cobro (
    id_notificacion BIGSERIAL PRIMARY KEY,
    id_inmueble BIGINT NOT NULL REFERENCES inmueble(id_inmueble),
    descripcion TEXT,
    fecha_emision DATE NOT NULL,
    id_moneda BIGINT NOT NULL REFERENCES moneda(id_moneda),
    monto_total NUMERIC(18, 2) NOT NULL,
    monto_pagado NUMERIC(18, 2) NOT NULL DEFAULT 0,
    monto_x_pagar NUMERIC(18, 2),
    estado VARCHAR(20) NOT NULL DEFAULT 'pendiente',
    CONSTRAINT chk_monto_total_non_negative CHECK (monto_total >= 0),
    CONSTRAINT chk_monto_pagado_non_negative CHECK (monto_pagado >= 0)
);

CREATE INDEX idx_notificacion_inmueble ON notificacion_cobro(id_inmueble, fecha_emision);
";

const AUTH_TOKENS_SQL: &str = r"
CREATE TABLE auth_tokens (
    token VARCHAR(128) PRIMARY KEY,
    user_id BIGINT NOT NULL,
    expires_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_auth_tokens_user ON auth_tokens(user_id);
";

const SEED_MONEDA_SQL: &str = r"
INSERT INTO moneda (codigo, nombre) VALUES
    ('VES', 'Bolivar'),
    ('USD', 'Dolar estadounidense'),
    ('EUR', 'Euro')
ON CONFLICT (codigo) DO NOTHING;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS auth_tokens CASCADE;
DROP TABLE IF EXISTS notificacion_cobro CASCADE;
DROP TABLE IF EXISTS credito_a_favor CASCADE;
DROP TABLE IF EXISTS cuenta CASCADE;
DROP TABLE IF EXISTS propietario_inmueble CASCADE;
DROP TABLE IF EXISTS inmueble CASCADE;
DROP TABLE IF EXISTS condominio CASCADE;
DROP TABLE IF EXISTS tipo_cambio CASCADE;
DROP TABLE IF EXISTS moneda CASCADE;
";
