//! Charge domain types.

use chrono::NaiveDate;
use condo_shared::types::{ChargeId, CurrencyId, PropertyId};
use rust_decimal::Decimal;
use serde::Serialize;

/// State text marking a fully paid charge (compared case-insensitively).
pub const PAID_STATE: &str = "pagada";

/// A charge issued against a property. Read-only from this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    /// Charge ID.
    pub id: ChargeId,
    /// Property the charge was issued to.
    pub property_id: PropertyId,
    /// Description shown to the resident.
    pub description: Option<String>,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Charge currency.
    pub currency_id: CurrencyId,
    /// Currency code (e.g. `USD`).
    pub currency_code: String,
    /// Total charged.
    pub total: Decimal,
    /// Amount already paid.
    pub paid: Decimal,
    /// Explicit override of the payable amount.
    pub payable_override: Option<Decimal>,
    /// Free-text state.
    pub state: String,
}

impl Charge {
    /// Amount still payable: the override when set, else total minus paid.
    #[must_use]
    pub fn remaining_payable(&self) -> Decimal {
        self.payable_override.unwrap_or(self.total - self.paid)
    }

    /// Outstanding debt, never negative. Ignores the payable override.
    #[must_use]
    pub fn outstanding_debt(&self) -> Decimal {
        (self.total - self.paid).max(Decimal::ZERO)
    }

    /// Whether the state marks the charge as paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.state.trim().eq_ignore_ascii_case(PAID_STATE)
    }

    /// Whether the charge can still receive a payment allocation.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.is_paid() && self.remaining_payable() > Decimal::ZERO
    }
}

/// A charge with a remaining payable amount and its rate to the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingCharge {
    /// Charge ID.
    #[serde(rename = "id_notificacion")]
    pub charge_id: ChargeId,
    /// Description.
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Issue date.
    #[serde(rename = "fecha_emision")]
    pub issued_on: NaiveDate,
    /// Charge currency.
    #[serde(rename = "id_moneda")]
    pub currency_id: CurrencyId,
    /// Currency code.
    #[serde(rename = "codigo_moneda")]
    pub currency_code: String,
    /// Total charged.
    #[serde(rename = "monto_total")]
    pub total: Decimal,
    /// Amount already paid.
    #[serde(rename = "monto_pagado")]
    pub paid: Decimal,
    /// Remaining payable amount.
    #[serde(rename = "monto_x_pagar")]
    pub remaining: Decimal,
    /// Conversion rate from the charge currency to the base currency.
    #[serde(rename = "tasa")]
    pub rate: Decimal,
}

impl PendingCharge {
    /// Build from a charge and its resolved rate.
    #[must_use]
    pub fn from_charge(charge: Charge, rate: Decimal) -> Self {
        let remaining = charge.remaining_payable();
        Self {
            charge_id: charge.id,
            description: charge.description,
            issued_on: charge.issued_on,
            currency_id: charge.currency_id,
            currency_code: charge.currency_code,
            total: charge.total,
            paid: charge.paid,
            remaining,
            rate,
        }
    }
}
