//! `SeaORM` Entity for condominio table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "condominio")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_condominio: i64,
    pub nombre: String,
    /// Settlement currency of every unit in the condominium.
    pub id_moneda: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inmueble::Entity")]
    Inmueble,
}

impl Related<super::inmueble::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inmueble.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
