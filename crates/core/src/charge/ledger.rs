//! Pending charge computation.

use std::collections::HashMap;
use std::sync::Arc;

use condo_shared::types::{CurrencyId, PropertyId};
use rust_decimal::Decimal;

use super::types::{Charge, PendingCharge};
use crate::currency::{RateRepository, RateResolver};
use crate::store::StoreError;

/// Repository trait for charge lookups.
pub trait ChargeRepository: Send + Sync {
    /// All charges issued to a property, in any state.
    fn charges_for_property(
        &self,
        property_id: PropertyId,
    ) -> impl std::future::Future<Output = Result<Vec<Charge>, StoreError>> + Send;

    /// All charges issued to any of the given properties.
    fn charges_for_properties(
        &self,
        property_ids: &[PropertyId],
    ) -> impl std::future::Future<Output = Result<Vec<Charge>, StoreError>> + Send;
}

/// Computes the charges of a property that can still be paid.
pub struct PendingChargeLedger<R: ChargeRepository + RateRepository> {
    repo: Arc<R>,
    rates: RateResolver<R>,
}

impl<R: ChargeRepository + RateRepository> PendingChargeLedger<R> {
    /// Create a new pending charge ledger.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        let rates = RateResolver::new(Arc::clone(&repo));
        Self { repo, rates }
    }

    /// List pending charges of a property with their rate to `base_currency`.
    ///
    /// A charge is pending when its remaining payable amount is positive and
    /// its state is not the paid state. Ordered by issue date, then ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list_pending(
        &self,
        property_id: PropertyId,
        base_currency: CurrencyId,
    ) -> Result<Vec<PendingCharge>, StoreError> {
        let mut charges: Vec<Charge> = self
            .repo
            .charges_for_property(property_id)
            .await?
            .into_iter()
            .filter(Charge::is_pending)
            .collect();
        charges.sort_by(|a, b| a.issued_on.cmp(&b.issued_on).then(a.id.cmp(&b.id)));

        let mut rate_cache: HashMap<CurrencyId, Decimal> = HashMap::new();
        let mut pending = Vec::with_capacity(charges.len());
        for charge in charges {
            let rate = match rate_cache.get(&charge.currency_id) {
                Some(rate) => *rate,
                None => {
                    let rate = self.rates.resolve(charge.currency_id, base_currency).await?;
                    rate_cache.insert(charge.currency_id, rate);
                    rate
                }
            };
            pending.push(PendingCharge::from_charge(charge, rate));
        }

        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryLedger;
    use condo_shared::types::ChargeId;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_filters_paid_and_settled_charges() {
        let ledger = InMemoryLedger::new();
        ledger.add_charge(1, 10, "2026-01-05", 1, dec!(100), dec!(0), None, "pendiente");
        ledger.add_charge(2, 10, "2026-01-06", 1, dec!(50), dec!(50), None, "pendiente");
        ledger.add_charge(3, 10, "2026-01-07", 1, dec!(80), dec!(0), None, " Pagada");
        ledger.add_charge(4, 10, "2026-01-08", 1, dec!(80), dec!(0), Some(dec!(0)), "parcial");
        ledger.add_charge(5, 11, "2026-01-08", 1, dec!(80), dec!(0), None, "pendiente");

        let pending = PendingChargeLedger::new(Arc::new(ledger))
            .list_pending(PropertyId::new(10), CurrencyId::new(1))
            .await
            .unwrap();

        let ids: Vec<ChargeId> = pending.iter().map(|p| p.charge_id).collect();
        assert_eq!(ids, vec![ChargeId::new(1)]);
        assert_eq!(pending[0].remaining, dec!(100));
        assert_eq!(pending[0].rate, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_ordered_by_issue_date_then_id() {
        let ledger = InMemoryLedger::new();
        ledger.add_charge(9, 10, "2026-02-01", 1, dec!(10), dec!(0), None, "pendiente");
        ledger.add_charge(7, 10, "2026-01-01", 1, dec!(10), dec!(0), None, "pendiente");
        ledger.add_charge(3, 10, "2026-02-01", 1, dec!(10), dec!(0), None, "pendiente");

        let pending = PendingChargeLedger::new(Arc::new(ledger))
            .list_pending(PropertyId::new(10), CurrencyId::new(1))
            .await
            .unwrap();

        let ids: Vec<i64> = pending.iter().map(|p| p.charge_id.get()).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }

    #[tokio::test]
    async fn test_carries_rate_to_base_currency() {
        let ledger = InMemoryLedger::new();
        ledger.add_rate(2, 1, dec!(36.5), "2026-01-01");
        ledger.add_charge(1, 10, "2026-01-05", 2, dec!(20), dec!(5), None, "pendiente");

        let pending = PendingChargeLedger::new(Arc::new(ledger))
            .list_pending(PropertyId::new(10), CurrencyId::new(1))
            .await
            .unwrap();

        assert_eq!(pending[0].remaining, dec!(15));
        assert_eq!(pending[0].rate, dec!(36.5));
    }
}
