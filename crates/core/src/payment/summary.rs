//! Base-currency totals of a submission.

use condo_shared::types::covers_with_tolerance;
use rust_decimal::Decimal;

use super::error::PaymentError;
use super::types::DetailSummary;
use crate::currency::convert_amount;

/// Accumulates allocated, tendered and outstanding totals in the base currency.
///
/// Every line is converted and rounded on its own before being added, so the
/// stored totals match what the client sees per line.
#[derive(Debug, Clone, Default)]
pub struct TotalsAccumulator {
    allocated: Decimal,
    tendered: Decimal,
    outstanding: Decimal,
    allocations: usize,
    instruments: usize,
}

impl TotalsAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allocation and the remaining balance of its charge.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if a conversion or a running total does not
    /// fit in a `Decimal`. The accumulator is left unchanged in that case.
    pub fn add_allocation(
        &mut self,
        amount: Decimal,
        rate: Decimal,
        remaining: Decimal,
    ) -> Result<(), PaymentError> {
        let allocated = add_converted(self.allocated, amount, rate)?;
        let outstanding = add_converted(self.outstanding, remaining, rate)?;
        self.allocated = allocated;
        self.outstanding = outstanding;
        self.allocations += 1;
        Ok(())
    }

    /// Add a payment instrument.
    ///
    /// # Errors
    ///
    /// Returns `AmountOutOfRange` if the conversion or the running total does
    /// not fit in a `Decimal`.
    pub fn add_instrument(&mut self, amount: Decimal, rate: Decimal) -> Result<(), PaymentError> {
        self.tendered = add_converted(self.tendered, amount, rate)?;
        self.instruments += 1;
        Ok(())
    }

    /// Allocated total in base.
    #[must_use]
    pub const fn allocated(&self) -> Decimal {
        self.allocated
    }

    /// Tendered total in base.
    #[must_use]
    pub const fn tendered(&self) -> Decimal {
        self.tendered
    }

    /// Outstanding total of the allocated charges in base.
    #[must_use]
    pub const fn outstanding(&self) -> Decimal {
        self.outstanding
    }

    /// Whether the instruments pay for every allocation, within tolerance.
    #[must_use]
    pub fn covers_allocations(&self) -> bool {
        covers_with_tolerance(self.tendered, self.allocated)
    }

    /// Whether the instruments settle the allocated charges entirely, within tolerance.
    #[must_use]
    pub fn covers_outstanding(&self) -> bool {
        covers_with_tolerance(self.tendered, self.outstanding)
    }

    /// Summary block stored with the report.
    #[must_use]
    pub fn summary(&self) -> DetailSummary {
        DetailSummary {
            abono_total_base: self.allocated,
            pagos_total_base: self.tendered,
            pendiente_total_base: self.outstanding,
            notificaciones: self.allocations,
            pagos: self.instruments,
            cubre_total_estimado: self.covers_outstanding(),
        }
    }
}

fn add_converted(total: Decimal, amount: Decimal, rate: Decimal) -> Result<Decimal, PaymentError> {
    convert_amount(amount, rate)
        .and_then(|converted| total.checked_add(converted))
        .ok_or(PaymentError::AmountOutOfRange)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn money() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn rate() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000).prop_map(|v| Decimal::new(v, 4))
    }

    // Coverage is exactly "tendered + 0.01 >= allocated".
    proptest! {
        #[test]
        fn prop_covers_allocations_matches_tolerance(
            allocations in prop::collection::vec((money(), rate()), 1..6),
            instruments in prop::collection::vec((money(), rate()), 1..6),
        ) {
            let mut totals = TotalsAccumulator::new();
            for (amount, rate) in &allocations {
                totals.add_allocation(*amount, *rate, *amount).unwrap();
            }
            for (amount, rate) in &instruments {
                totals.add_instrument(*amount, *rate).unwrap();
            }

            let expected = totals.tendered() + dec_tolerance() >= totals.allocated();
            prop_assert_eq!(totals.covers_allocations(), expected);
        }
    }

    // Paying each allocation with the same amount and rate always covers it.
    proptest! {
        #[test]
        fn prop_mirror_payment_covers(
            lines in prop::collection::vec((money(), rate()), 1..8),
        ) {
            let mut totals = TotalsAccumulator::new();
            for (amount, rate) in &lines {
                totals.add_allocation(*amount, *rate, *amount).unwrap();
                totals.add_instrument(*amount, *rate).unwrap();
            }

            prop_assert!(totals.covers_allocations());
            prop_assert!(totals.summary().cubre_total_estimado);
            prop_assert_eq!(totals.summary().notificaciones, lines.len());
        }
    }

    fn dec_tolerance() -> Decimal {
        Decimal::new(1, 2)
    }
}
