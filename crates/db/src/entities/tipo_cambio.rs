//! `SeaORM` Entity for tipo_cambio table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipo_cambio")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_tipo_cambio: i64,
    pub id_moneda_origen: i64,
    pub id_moneda_destino: i64,
    /// One unit of origin expressed in destination.
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub tasa: Decimal,
    pub fecha_vigencia: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
