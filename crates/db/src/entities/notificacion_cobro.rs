//! `SeaORM` Entity for notificacion_cobro table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notificacion_cobro")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_notificacion: i64,
    pub id_inmueble: i64,
    pub descripcion: Option<String>,
    pub fecha_emision: Date,
    pub id_moneda: i64,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub monto_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub monto_pagado: Decimal,
    /// Explicit payable amount set by the administration.
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub monto_x_pagar: Option<Decimal>,
    pub estado: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::moneda::Entity",
        from = "Column::IdMoneda",
        to = "super::moneda::Column::IdMoneda"
    )]
    Moneda,
}

impl Related<super::moneda::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Moneda.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
