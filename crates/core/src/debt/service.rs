//! Property listing with debt summaries.

use std::sync::Arc;

use condo_shared::types::{PropertyId, UserId};
use serde::Serialize;
use tracing::debug;

use super::aggregator::{DebtAggregator, DebtSummary};
use crate::charge::ChargeRepository;
use crate::property::{Property, PropertyRepository};
use crate::store::StoreError;

/// A property with its debt summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyWithDebt {
    /// The property.
    #[serde(flatten)]
    pub property: Property,
    /// Its debt figures.
    #[serde(flatten)]
    pub debt: DebtSummary,
}

/// Lists the properties of a user with their debt.
pub struct PropertyDebtService<R: PropertyRepository + ChargeRepository> {
    repo: Arc<R>,
}

impl<R: PropertyRepository + ChargeRepository> PropertyDebtService<R> {
    /// Create a new property debt service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Properties the user owns or co-owns, by ID, each with its debt.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list_with_debt(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PropertyWithDebt>, StoreError> {
        let properties = self.repo.list_accessible(user_id).await?;
        if properties.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<PropertyId> = properties.iter().map(|p| p.id).collect();
        let charges = self.repo.charges_for_properties(&ids).await?;
        let mut summaries = DebtAggregator::summarize(&ids, &charges);

        debug!(
            user_id = %user_id,
            properties = ids.len(),
            charges = charges.len(),
            "Aggregated debt"
        );

        Ok(properties
            .into_iter()
            .map(|property| {
                let debt = summaries.remove(&property.id).unwrap_or_default();
                PropertyWithDebt { property, debt }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryLedger;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_lists_owned_and_co_owned_properties() {
        let ledger = InMemoryLedger::new();
        ledger.add_property(10, 1, Some(7), 1);
        ledger.add_property(11, 1, None, 1);
        ledger.add_property(12, 1, Some(8), 1);
        ledger.add_co_owner(11, 7);
        ledger.add_charge(1, 10, "2026-01-05", 1, dec!(40), dec!(0), None, "pendiente");
        ledger.add_charge(2, 12, "2026-01-05", 1, dec!(99), dec!(0), None, "pendiente");

        let listed = PropertyDebtService::new(Arc::new(ledger))
            .list_with_debt(UserId::new(7))
            .await
            .unwrap();

        let ids: Vec<i64> = listed.iter().map(|p| p.property.id.get()).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(listed[0].debt.deuda_actual, "40.00");
        assert_eq!(listed[1].debt, DebtSummary::default());
    }

    #[tokio::test]
    async fn test_flattened_json_shape() {
        let ledger = InMemoryLedger::new();
        ledger.add_property(10, 1, Some(7), 1);

        let listed = PropertyDebtService::new(Arc::new(ledger))
            .list_with_debt(UserId::new(7))
            .await
            .unwrap();
        let json = serde_json::to_value(&listed[0]).unwrap();

        assert_eq!(json["id_inmueble"], 10);
        assert_eq!(json["deuda_actual"], "0.00");
        assert!(json["proxima_fecha_pago"].is_null());
        assert!(json["pagos"].as_array().unwrap().is_empty());
    }
}
