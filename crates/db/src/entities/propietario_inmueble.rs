//! `SeaORM` Entity for propietario_inmueble table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "propietario_inmueble")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_inmueble: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_usuario: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inmueble::Entity",
        from = "Column::IdInmueble",
        to = "super::inmueble::Column::IdInmueble"
    )]
    Inmueble,
}

impl Related<super::inmueble::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inmueble.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
