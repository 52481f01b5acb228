//! Conversion rate lookup with an explicit fallback.

use std::sync::Arc;

use condo_shared::types::CurrencyId;
use rust_decimal::Decimal;
use tracing::warn;

use crate::store::StoreError;

/// Repository trait for conversion rate lookups.
///
/// Rates are directed (`from` -> `to`) and versioned by effective date.
pub trait RateRepository: Send + Sync {
    /// Latest rate for the ordered pair, by effective date.
    fn latest_rate(
        &self,
        from: CurrencyId,
        to: CurrencyId,
    ) -> impl std::future::Future<Output = Result<Option<Decimal>, StoreError>> + Send;
}

/// Resolves the factor that converts `from` amounts into `to` amounts.
pub struct RateResolver<R: RateRepository> {
    repo: Arc<R>,
}

impl<R: RateRepository> Clone for RateResolver<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: RateRepository> RateResolver<R> {
    /// Create a new rate resolver.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve the conversion factor between two currencies.
    ///
    /// The same currency always converts at exactly 1. A missing or
    /// non-positive rate also yields 1 and is logged, so a gap in the rate
    /// table never blocks a payment report.
    ///
    /// # Errors
    ///
    /// Returns an error only if the repository itself fails.
    pub async fn resolve(&self, from: CurrencyId, to: CurrencyId) -> Result<Decimal, StoreError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        match self.repo.latest_rate(from, to).await? {
            Some(rate) if rate > Decimal::ZERO => Ok(rate),
            Some(rate) => {
                warn!(%from, %to, %rate, "Non-positive conversion rate, falling back to 1");
                Ok(Decimal::ONE)
            }
            None => {
                warn!(%from, %to, "No conversion rate found, falling back to 1");
                Ok(Decimal::ONE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryLedger;
    use rust_decimal_macros::dec;

    fn resolver(ledger: InMemoryLedger) -> RateResolver<InMemoryLedger> {
        RateResolver::new(Arc::new(ledger))
    }

    #[tokio::test]
    async fn test_same_currency_is_one() {
        let ledger = InMemoryLedger::new();
        ledger.add_rate(1, 1, dec!(5), "2026-01-01");
        let rate = resolver(ledger)
            .resolve(CurrencyId::new(1), CurrencyId::new(1))
            .await
            .unwrap();
        assert_eq!(rate, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_most_recent_rate_wins() {
        let ledger = InMemoryLedger::new();
        ledger.add_rate(2, 1, dec!(36.10), "2026-01-01");
        ledger.add_rate(2, 1, dec!(36.75), "2026-02-01");
        ledger.add_rate(2, 1, dec!(35.90), "2025-12-01");
        let rate = resolver(ledger)
            .resolve(CurrencyId::new(2), CurrencyId::new(1))
            .await
            .unwrap();
        assert_eq!(rate, dec!(36.75));
    }

    #[tokio::test]
    async fn test_rates_are_directed() {
        let ledger = InMemoryLedger::new();
        ledger.add_rate(2, 1, dec!(36.75), "2026-02-01");
        let rate = resolver(ledger)
            .resolve(CurrencyId::new(1), CurrencyId::new(2))
            .await
            .unwrap();
        assert_eq!(rate, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_non_positive_rate_falls_back_to_one() {
        let ledger = InMemoryLedger::new();
        ledger.add_rate(3, 1, dec!(0), "2026-02-01");
        let rate = resolver(ledger)
            .resolve(CurrencyId::new(3), CurrencyId::new(1))
            .await
            .unwrap();
        assert_eq!(rate, Decimal::ONE);
    }
}
