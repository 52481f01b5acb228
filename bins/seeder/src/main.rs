//! Development data seeder.
//!
//! Seeds a demo condominium with two units, charges, exchange rates,
//! destination accounts, a credit and a long-lived bearer token for the demo
//! owner so the API can be exercised locally.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, NaiveDate, Utc};
use condo_db::TokenRepository;
use condo_db::entities::{
    auth_tokens, condominio, credito_a_favor, cuenta, inmueble, moneda, notificacion_cobro,
    tipo_cambio,
};
use condo_shared::config::DatabaseConfig;
use condo_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Demo owner (users live in the identity service).
const DEMO_USER_ID: i64 = 1;
/// Bearer token printed at the end of the run.
const DEMO_TOKEN: &str = "dev-condo-owner-token";
const DEMO_CONDO_NAME: &str = "Residencias Demo";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("CONDO__DATABASE__URL"))
        .expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = condo_db::connect(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    })
    .await
    .expect("Failed to connect to database");

    let ves = currency_id(&db, "VES").await;
    let usd = currency_id(&db, "USD").await;
    let eur = currency_id(&db, "EUR").await;

    println!("Seeding exchange rates...");
    seed_exchange_rates(&db, ves, usd, eur).await;

    println!("Seeding demo condominium...");
    let Some(condo) = seed_condominium(&db, ves).await else {
        println!("  Demo condominium already exists, skipping...");
        seed_token(&db).await;
        println!("Seeding complete!");
        return;
    };

    println!("Seeding units and charges...");
    seed_units(&db, condo, ves, usd).await;

    println!("Seeding accounts...");
    seed_accounts(&db, condo, ves, usd).await;

    println!("Seeding bearer token...");
    seed_token(&db).await;

    println!("Seeding complete!");
}

async fn currency_id(db: &DatabaseConnection, code: &str) -> i64 {
    moneda::Entity::find()
        .filter(moneda::Column::Codigo.eq(code))
        .one(db)
        .await
        .expect("Failed to query moneda")
        .unwrap_or_else(|| panic!("Currency {code} missing, run the migrator first"))
        .id_moneda
}

/// Seeds 30 days of rates towards the bolivar.
async fn seed_exchange_rates(db: &DatabaseConnection, ves: i64, usd: i64, eur: i64) {
    let today = Utc::now().date_naive();
    let mut inserted = 0;

    for day_offset in 0..30_i64 {
        let effective = today - Duration::days(day_offset);
        // Older rates are a little cheaper, in whole cents.
        let drift = Decimal::new(day_offset * 5, 2);

        for (from, base) in [(usd, Decimal::new(3650, 2)), (eur, Decimal::new(3940, 2))] {
            let rate = tipo_cambio::ActiveModel {
                id_moneda_origen: Set(from),
                id_moneda_destino: Set(ves),
                tasa: Set(base - drift),
                fecha_vigencia: Set(effective),
                ..Default::default()
            };
            if let Err(e) = rate.insert(db).await {
                eprintln!("Failed to insert tipo_cambio: {e}");
            } else {
                inserted += 1;
            }
        }
    }

    println!("  Created {inserted} exchange rates");
}

/// Returns the new condominium ID, or `None` if it was seeded before.
async fn seed_condominium(db: &DatabaseConnection, ves: i64) -> Option<i64> {
    let existing = condominio::Entity::find()
        .filter(condominio::Column::Nombre.eq(DEMO_CONDO_NAME))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        return None;
    }

    let condo = condominio::ActiveModel {
        nombre: Set(DEMO_CONDO_NAME.to_string()),
        id_moneda: Set(ves),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert condominio");

    println!("  Created condominium: {}", condo.nombre);
    Some(condo.id_condominio)
}

async fn seed_units(db: &DatabaseConnection, condo: i64, ves: i64, usd: i64) {
    for (label, floor) in [("A-1-1", "1"), ("A-2-3", "2")] {
        let unit = inmueble::ActiveModel {
            id_condominio: Set(condo),
            id_usuario: Set(Some(DEMO_USER_ID)),
            alicuota: Set(Some(Decimal::new(250, 2))),
            estado: Set(Some("ocupado".to_string())),
            torre: Set(Some("A".to_string())),
            piso: Set(Some(floor.to_string())),
            identificacion: Set(Some(label.to_string())),
            tipo: Set(Some("apartamento".to_string())),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert inmueble");

        let charges = [
            (
                "Cuota ordinaria enero",
                date(2026, 1, 5),
                usd,
                Decimal::new(4500, 2),
                Decimal::new(4500, 2),
                "pagada",
            ),
            (
                "Cuota ordinaria febrero",
                date(2026, 2, 5),
                usd,
                Decimal::new(4500, 2),
                Decimal::new(1500, 2),
                "parcial",
            ),
            (
                "Cuota ordinaria marzo",
                date(2026, 3, 5),
                usd,
                Decimal::new(4500, 2),
                Decimal::ZERO,
                "pendiente",
            ),
            (
                "Fondo de reserva",
                date(2026, 3, 5),
                ves,
                Decimal::new(82_000, 2),
                Decimal::ZERO,
                "pendiente",
            ),
        ];
        for (description, issued_on, currency, total, paid, state) in charges {
            let charge = notificacion_cobro::ActiveModel {
                id_inmueble: Set(unit.id_inmueble),
                descripcion: Set(Some(description.to_string())),
                fecha_emision: Set(issued_on),
                id_moneda: Set(currency),
                monto_total: Set(total),
                monto_pagado: Set(paid),
                monto_x_pagar: Set(None),
                estado: Set(state.to_string()),
                ..Default::default()
            };
            if let Err(e) = charge.insert(db).await {
                eprintln!("Failed to insert notificacion_cobro: {e}");
            }
        }

        println!("  Created unit {label} with 4 charges");
    }

    let first_unit = inmueble::Entity::find()
        .filter(inmueble::Column::IdCondominio.eq(condo))
        .one(db)
        .await
        .ok()
        .flatten();
    if let Some(unit) = first_unit {
        let credit = credito_a_favor::ActiveModel {
            id_inmueble: Set(unit.id_inmueble),
            id_moneda: Set(usd),
            monto: Set(Decimal::new(1000, 2)),
            estado: Set("activo".to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        if let Err(e) = credit.insert(db).await {
            eprintln!("Failed to insert credito_a_favor: {e}");
        }
    }
}

async fn seed_accounts(db: &DatabaseConnection, condo: i64, ves: i64, usd: i64) {
    let accounts = [
        ("Banco de Venezuela", "Cuenta corriente", "transferencia", ves),
        ("Banesco", "Pago movil", "pago_movil", ves),
        ("Zelle", "Zelle junta", "zelle", usd),
    ];
    for (bank, name, kind, currency) in accounts {
        let account = cuenta::ActiveModel {
            id_condominio: Set(condo),
            nombre: Set(name.to_string()),
            tipo: Set(Some(kind.to_string())),
            banco: Set(Some(bank.to_string())),
            id_moneda: Set(currency),
            titular: Set(Some("Junta de Condominio".to_string())),
            rif: Set(Some("J-00000000-0".to_string())),
            ..Default::default()
        };
        if let Err(e) = account.insert(db).await {
            eprintln!("Failed to insert cuenta: {e}");
        }
    }
    println!("  Created {} accounts", accounts.len());
}

async fn seed_token(db: &DatabaseConnection) {
    let existing = auth_tokens::Entity::find_by_id(DEMO_TOKEN.to_string())
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Token already exists: {DEMO_TOKEN}");
        return;
    }

    let expires_at = Utc::now() + Duration::days(365);
    match TokenRepository::new(db.clone())
        .create(DEMO_TOKEN, UserId::new(DEMO_USER_ID), expires_at)
        .await
    {
        Ok(()) => println!("  Created token for user {DEMO_USER_ID}: {DEMO_TOKEN}"),
        Err(e) => eprintln!("Failed to insert auth token: {e}"),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
