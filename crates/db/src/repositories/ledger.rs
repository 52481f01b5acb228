//! Read side of the condominium schema: rates, units, charges and funding.
//!
//! `PostgresLedger` implements every core repository trait; the payment
//! report writes live in `payment_report.rs`.

use condo_core::StoreError;
use condo_core::charge::{Charge, ChargeRepository};
use condo_core::currency::RateRepository;
use condo_core::payment::{CreditBalance, FundingRepository, PaymentAccount};
use condo_core::property::{Property, PropertyRepository};
use condo_shared::types::{
    AccountId, ChargeId, CondominiumId, CurrencyId, PropertyId, UserId,
};
use rust_decimal::Decimal;
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Statement,
};

use crate::entities::{
    condominio, cuenta, inmueble, moneda, notificacion_cobro, propietario_inmueble, tipo_cambio,
};

/// Active credits per currency, positive sums only.
const CREDIT_BALANCES_SQL: &str = r"
SELECT m.id_moneda, m.codigo AS moneda, SUM(c.monto) AS saldo_credito
FROM credito_a_favor c
JOIN moneda m ON c.id_moneda = m.id_moneda
WHERE c.id_inmueble = $1
  AND c.estado = 'activo'
GROUP BY m.id_moneda, m.codigo
HAVING SUM(c.monto) > 0
ORDER BY m.codigo
";

/// `SeaORM`-backed store for the payment workflow.
#[derive(Debug, Clone)]
pub struct PostgresLedger {
    pub(crate) db: DatabaseConnection,
}

impl PostgresLedger {
    /// Creates a new ledger over a pooled connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn store_err(err: DbErr) -> StoreError {
    StoreError::backend(err.to_string())
}

/// Units the user owns directly or through `propietario_inmueble`.
fn accessible_to(user_id: UserId) -> Condition {
    Condition::any()
        .add(inmueble::Column::IdUsuario.eq(user_id.get()))
        .add(
            inmueble::Column::IdInmueble.in_subquery(
                Query::select()
                    .column(propietario_inmueble::Column::IdInmueble)
                    .from(propietario_inmueble::Entity)
                    .and_where(propietario_inmueble::Column::IdUsuario.eq(user_id.get()))
                    .to_owned(),
            ),
        )
}

impl RateRepository for PostgresLedger {
    async fn latest_rate(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> Result<Option<Decimal>, StoreError> {
        let row = tipo_cambio::Entity::find()
            .filter(tipo_cambio::Column::IdMonedaOrigen.eq(from.get()))
            .filter(tipo_cambio::Column::IdMonedaDestino.eq(to.get()))
            .order_by_desc(tipo_cambio::Column::FechaVigencia)
            .order_by_desc(tipo_cambio::Column::IdTipoCambio)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(row.map(|r| r.tasa))
    }
}

impl PropertyRepository for PostgresLedger {
    async fn find_accessible(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> Result<Option<Property>, StoreError> {
        let row = inmueble::Entity::find_by_id(property_id.get())
            .filter(accessible_to(user_id))
            .find_also_related(condominio::Entity)
            .one(&self.db)
            .await
            .map_err(store_err)?;

        row.map(to_property).transpose()
    }

    async fn list_accessible(&self, user_id: UserId) -> Result<Vec<Property>, StoreError> {
        let rows = inmueble::Entity::find()
            .filter(accessible_to(user_id))
            .find_also_related(condominio::Entity)
            .order_by_asc(inmueble::Column::IdInmueble)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        rows.into_iter().map(to_property).collect()
    }
}

impl ChargeRepository for PostgresLedger {
    async fn charges_for_property(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<Charge>, StoreError> {
        self.charges_for_properties(&[property_id]).await
    }

    async fn charges_for_properties(
        &self,
        property_ids: &[PropertyId],
    ) -> Result<Vec<Charge>, StoreError> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = notificacion_cobro::Entity::find()
            .filter(
                notificacion_cobro::Column::IdInmueble
                    .is_in(property_ids.iter().map(|id| id.get())),
            )
            .find_also_related(moneda::Entity)
            .order_by_asc(notificacion_cobro::Column::FechaEmision)
            .order_by_asc(notificacion_cobro::Column::IdNotificacion)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows.into_iter().map(to_charge).collect())
    }
}

impl FundingRepository for PostgresLedger {
    async fn payment_accounts(
        &self,
        condominium_id: CondominiumId,
    ) -> Result<Vec<PaymentAccount>, StoreError> {
        let rows = cuenta::Entity::find()
            .filter(cuenta::Column::IdCondominio.eq(condominium_id.get()))
            .find_also_related(moneda::Entity)
            .order_by_asc(cuenta::Column::Banco)
            .order_by_asc(cuenta::Column::Nombre)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows.into_iter().map(to_account).collect())
    }

    async fn credit_balances(
        &self,
        property_id: PropertyId,
    ) -> Result<Vec<CreditBalance>, StoreError> {
        #[derive(Debug, FromQueryResult)]
        struct CreditRow {
            id_moneda: i64,
            moneda: String,
            saldo_credito: Decimal,
        }

        let rows = CreditRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            CREDIT_BALANCES_SQL,
            [property_id.get().into()],
        ))
        .all(&self.db)
        .await
        .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|row| CreditBalance {
                currency_id: CurrencyId::new(row.id_moneda),
                currency_code: row.moneda,
                balance: row.saldo_credito,
            })
            .collect())
    }
}

fn to_property(
    (unit, condo): (inmueble::Model, Option<condominio::Model>),
) -> Result<Property, StoreError> {
    let condo = condo.ok_or_else(|| {
        StoreError::backend(format!(
            "inmueble {} references a missing condominio {}",
            unit.id_inmueble, unit.id_condominio
        ))
    })?;

    Ok(Property {
        id: PropertyId::new(unit.id_inmueble),
        condominium_id: CondominiumId::new(unit.id_condominio),
        owner_id: unit.id_usuario.map(UserId::new),
        base_currency_id: CurrencyId::new(condo.id_moneda),
        alicuota: unit.alicuota,
        estado: unit.estado,
        torre: unit.torre,
        piso: unit.piso,
        identificacion: unit.identificacion,
        manzana: unit.manzana,
        calle: unit.calle,
        avenida: unit.avenida,
        tipo: unit.tipo,
        correlativo: unit.correlativo,
    })
}

fn to_charge((row, currency): (notificacion_cobro::Model, Option<moneda::Model>)) -> Charge {
    Charge {
        id: ChargeId::new(row.id_notificacion),
        property_id: PropertyId::new(row.id_inmueble),
        description: row.descripcion,
        issued_on: row.fecha_emision,
        currency_id: CurrencyId::new(row.id_moneda),
        currency_code: currency.map(|m| m.codigo).unwrap_or_default(),
        total: row.monto_total,
        paid: row.monto_pagado,
        payable_override: row.monto_x_pagar,
        state: row.estado,
    }
}

fn to_account((row, currency): (cuenta::Model, Option<moneda::Model>)) -> PaymentAccount {
    PaymentAccount {
        id: AccountId::new(row.id_cuenta),
        name: row.nombre,
        kind: row.tipo,
        bank: row.banco,
        currency_code: currency.map(|m| m.codigo).unwrap_or_default(),
        currency_id: CurrencyId::new(row.id_moneda),
        account_number: row.numero_cuenta_cliente,
        bank_code: row.codigo_banco,
        holder: row.titular,
        rif: row.rif,
        phone: row.celular,
    }
}
