//! `SeaORM` Entity for moneda table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "moneda")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_moneda: i64,
    #[sea_orm(unique)]
    pub codigo: String,
    pub nombre: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
