//! `SeaORM` Entity for inmueble table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inmueble")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_inmueble: i64,
    pub id_condominio: i64,
    /// Direct owner. Co-owners live in `propietario_inmueble`.
    pub id_usuario: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((10, 6)))", nullable)]
    pub alicuota: Option<Decimal>,
    pub estado: Option<String>,
    pub torre: Option<String>,
    pub piso: Option<String>,
    pub identificacion: Option<String>,
    pub manzana: Option<String>,
    pub calle: Option<String>,
    pub avenida: Option<String>,
    pub tipo: Option<String>,
    pub correlativo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::condominio::Entity",
        from = "Column::IdCondominio",
        to = "super::condominio::Column::IdCondominio"
    )]
    Condominio,
    #[sea_orm(has_many = "super::propietario_inmueble::Entity")]
    PropietarioInmueble,
}

impl Related<super::condominio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Condominio.def()
    }
}

impl Related<super::propietario_inmueble::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropietarioInmueble.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
