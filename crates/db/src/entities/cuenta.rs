//! `SeaORM` Entity for cuenta table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cuenta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_cuenta: i64,
    pub id_condominio: i64,
    pub nombre: String,
    pub tipo: Option<String>,
    pub banco: Option<String>,
    pub id_moneda: i64,
    pub numero_cuenta_cliente: Option<String>,
    pub codigo_banco: Option<String>,
    pub titular: Option<String>,
    pub rif: Option<String>,
    pub celular: Option<String>,
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
