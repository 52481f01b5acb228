//! `SeaORM` Entity for credito_a_favor table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "credito_a_favor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_credito: i64,
    pub id_inmueble: i64,
    pub id_moneda: i64,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub monto: Decimal,
    /// Only `activo` credits count towards the balance.
    pub estado: String,
    pub created_at: DateTimeWithTimeZone,
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
