//! `SeaORM` Entity for pago_reportado_app table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pago_reportado_app")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub id_usuario: i64,
    pub id_inmueble: i64,
    pub id_condominio: i64,
    pub fecha_pago: Date,
    pub observacion: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_base: Decimal,
    pub moneda_base: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub detalle: Json,
    pub estado: String,
    pub motivo_rechazo: Option<String>,
    #[sea_orm(unique)]
    pub client_uuid: Uuid,
    pub evidencia_path: Option<String>,
    pub evidencia_url: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub aprobado_at: Option<DateTimeWithTimeZone>,
    pub rechazado_at: Option<DateTimeWithTimeZone>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
