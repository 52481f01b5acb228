//! Shared fixtures for database integration tests.
//!
//! Tests run against `DATABASE_URL` and are skipped when it is unset.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tokio::sync::OnceCell;
use uuid::Uuid;

use condo_db::entities::{
    condominio, credito_a_favor, cuenta, inmueble, moneda, notificacion_cobro,
    propietario_inmueble, tipo_cambio,
};
use condo_db::migration::{Migrator, MigratorTrait};

static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn database_url() -> Option<String> {
    std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("CONDO__DATABASE__URL"))
        .ok()
}

/// Connect and make sure the schema is current, or `None` without a database.
pub async fn connect() -> Option<DatabaseConnection> {
    let url = database_url()?;
    MIGRATED
        .get_or_init(|| async {
            let db = Database::connect(&url)
                .await
                .expect("Failed to connect to database");
            Migrator::up(&db, None).await.expect("Failed to run migrations");
        })
        .await;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

/// A fresh id that will not collide with other test runs.
pub fn unique_id() -> i64 {
    i64::try_from(Uuid::new_v4().as_u128() % 1_000_000_000_000).unwrap() + 1_000_000
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Currencies, a condominium and one unit owned by `owner`.
pub struct Fixture {
    pub owner: i64,
    pub base: i64,
    pub usd: i64,
    pub condo: i64,
    pub property: i64,
}

pub async fn currency(db: &DatabaseConnection) -> i64 {
    let code = format!("T{}", &Uuid::new_v4().simple().to_string()[..8]);
    moneda::ActiveModel {
        codigo: Set(code.clone()),
        nombre: Set(Some(format!("Test {code}"))),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create moneda")
    .id_moneda
}

pub async fn setup(db: &DatabaseConnection) -> Fixture {
    let base = currency(db).await;
    let usd = currency(db).await;

    let condo = condominio::ActiveModel {
        nombre: Set("Residencias Test".to_string()),
        id_moneda: Set(base),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create condominio")
    .id_condominio;

    let owner = unique_id();
    let property = unit(db, condo, Some(owner)).await;

    Fixture {
        owner,
        base,
        usd,
        condo,
        property,
    }
}

pub async fn unit(db: &DatabaseConnection, condo: i64, owner: Option<i64>) -> i64 {
    inmueble::ActiveModel {
        id_condominio: Set(condo),
        id_usuario: Set(owner),
        alicuota: Set(Some(Decimal::new(125, 2))),
        torre: Set(Some("A".to_string())),
        piso: Set(Some("3".to_string())),
        identificacion: Set(Some("A-3-2".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create inmueble")
    .id_inmueble
}

pub async fn co_owner(db: &DatabaseConnection, property: i64, user: i64) {
    propietario_inmueble::ActiveModel {
        id_inmueble: Set(property),
        id_usuario: Set(user),
    }
    .insert(db)
    .await
    .expect("Failed to create propietario_inmueble");
}

pub async fn rate(db: &DatabaseConnection, from: i64, to: i64, tasa: Decimal, effective: &str) {
    tipo_cambio::ActiveModel {
        id_moneda_origen: Set(from),
        id_moneda_destino: Set(to),
        tasa: Set(tasa),
        fecha_vigencia: Set(date(effective)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create tipo_cambio");
}

pub async fn charge(
    db: &DatabaseConnection,
    property: i64,
    issued_on: &str,
    currency: i64,
    total: Decimal,
    paid: Decimal,
    estado: &str,
) -> i64 {
    notificacion_cobro::ActiveModel {
        id_inmueble: Set(property),
        descripcion: Set(Some(format!("Cuota {issued_on}"))),
        fecha_emision: Set(date(issued_on)),
        id_moneda: Set(currency),
        monto_total: Set(total),
        monto_pagado: Set(paid),
        monto_x_pagar: Set(None),
        estado: Set(estado.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create notificacion_cobro")
    .id_notificacion
}

pub async fn account(
    db: &DatabaseConnection,
    condo: i64,
    banco: &str,
    nombre: &str,
    currency: i64,
) {
    cuenta::ActiveModel {
        id_condominio: Set(condo),
        nombre: Set(nombre.to_string()),
        tipo: Set(Some("transferencia".to_string())),
        banco: Set(Some(banco.to_string())),
        id_moneda: Set(currency),
        titular: Set(Some("Junta de Condominio".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create cuenta");
}

pub async fn credit(
    db: &DatabaseConnection,
    property: i64,
    currency: i64,
    monto: Decimal,
    estado: &str,
) {
    credito_a_favor::ActiveModel {
        id_inmueble: Set(property),
        id_moneda: Set(currency),
        monto: Set(monto),
        estado: Set(estado.to_string()),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create credito_a_favor");
}
