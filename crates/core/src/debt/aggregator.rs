//! Pure debt aggregation over charges.

use std::collections::HashMap;

use chrono::NaiveDate;
use condo_shared::types::{ChargeId, PropertyId, format_amount};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::charge::Charge;

/// Maximum history entries per property.
pub const HISTORY_LIMIT: usize = 10;

/// One line of the payment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Charge ID.
    pub id_notificacion: ChargeId,
    /// Charge description.
    pub descripcion: Option<String>,
    /// Issue date.
    pub fecha: NaiveDate,
    /// Amount, 2 decimals.
    pub monto: String,
    /// Charge state as stored.
    pub estado: String,
}

/// Debt figures of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtSummary {
    /// Outstanding debt, 2 decimals.
    pub deuda_actual: String,
    /// Earliest issue date among unpaid charges.
    pub proxima_fecha_pago: Option<NaiveDate>,
    /// Latest charges, newest first.
    pub pagos: Vec<HistoryEntry>,
}

impl Default for DebtSummary {
    fn default() -> Self {
        Self {
            deuda_actual: format_amount(Decimal::ZERO),
            proxima_fecha_pago: None,
            pagos: Vec::new(),
        }
    }
}

/// Folds charges into per-property debt summaries.
pub struct DebtAggregator;

impl DebtAggregator {
    /// Summarize debt for every property in `property_ids`.
    ///
    /// Charges of properties outside `property_ids` are ignored. Properties
    /// without charges get a zero summary.
    #[must_use]
    pub fn summarize(
        property_ids: &[PropertyId],
        charges: &[Charge],
    ) -> HashMap<PropertyId, DebtSummary> {
        let mut by_property: HashMap<PropertyId, Vec<&Charge>> =
            property_ids.iter().map(|id| (*id, Vec::new())).collect();
        for charge in charges {
            if let Some(list) = by_property.get_mut(&charge.property_id) {
                list.push(charge);
            }
        }

        by_property
            .into_iter()
            .map(|(id, charges)| (id, Self::summarize_property(&charges)))
            .collect()
    }

    fn summarize_property(charges: &[&Charge]) -> DebtSummary {
        let mut debt = Decimal::ZERO;
        let mut next_due: Option<NaiveDate> = None;

        for charge in charges.iter().filter(|c| !c.is_paid()) {
            debt += charge.outstanding_debt();
            next_due = Some(next_due.map_or(charge.issued_on, |d| d.min(charge.issued_on)));
        }

        let mut history: Vec<&Charge> = charges.to_vec();
        history.sort_by(|a, b| b.issued_on.cmp(&a.issued_on).then(b.id.cmp(&a.id)));
        let pagos = history
            .into_iter()
            .take(HISTORY_LIMIT)
            .map(|charge| HistoryEntry {
                id_notificacion: charge.id,
                descripcion: charge.description.clone(),
                fecha: charge.issued_on,
                monto: format_amount(history_amount(charge)),
                estado: charge.state.clone(),
            })
            .collect();

        DebtSummary {
            deuda_actual: format_amount(debt),
            proxima_fecha_pago: next_due,
            pagos,
        }
    }
}

/// Amount shown in the history: what was paid for paid charges, what is
/// still owed otherwise, and the charge total when that figure is zero.
fn history_amount(charge: &Charge) -> Decimal {
    let amount = if charge.is_paid() {
        charge.paid
    } else {
        charge.outstanding_debt()
    };
    if amount.is_zero() { charge.total } else { amount }
}
