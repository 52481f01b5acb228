//! Property domain types.

use condo_shared::types::{CondominiumId, CurrencyId, PropertyId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

/// A unit inside a condominium.
///
/// Serialized with the field names the mobile client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Property ID.
    #[serde(rename = "id_inmueble")]
    pub id: PropertyId,
    /// Condominium the unit belongs to.
    #[serde(rename = "id_condominio")]
    pub condominium_id: CondominiumId,
    /// Direct owner, if any. Co-owners are kept separately.
    #[serde(rename = "id_usuario")]
    pub owner_id: Option<UserId>,
    /// Settlement currency, inherited from the condominium.
    #[serde(rename = "id_moneda_base")]
    pub base_currency_id: CurrencyId,
    /// Share of the common expenses.
    pub alicuota: Option<Decimal>,
    /// Free-text state of the unit.
    pub estado: Option<String>,
    /// Tower.
    pub torre: Option<String>,
    /// Floor.
    pub piso: Option<String>,
    /// Unit identification (door number, code).
    pub identificacion: Option<String>,
    /// Block.
    pub manzana: Option<String>,
    /// Street.
    pub calle: Option<String>,
    /// Avenue.
    pub avenida: Option<String>,
    /// Unit type.
    pub tipo: Option<String>,
    /// Sequence number inside the condominium.
    pub correlativo: Option<String>,
}

impl Property {
    /// Minimal property with no descriptive fields.
    #[must_use]
    pub const fn new(
        id: PropertyId,
        condominium_id: CondominiumId,
        owner_id: Option<UserId>,
        base_currency_id: CurrencyId,
    ) -> Self {
        Self {
            id,
            condominium_id,
            owner_id,
            base_currency_id,
            alicuota: None,
            estado: None,
            torre: None,
            piso: None,
            identificacion: None,
            manzana: None,
            calle: None,
            avenida: None,
            tipo: None,
            correlativo: None,
        }
    }
}
