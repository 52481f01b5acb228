//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal`; comparisons between totals that went
//! through rate multiplication use a fixed absolute tolerance instead of
//! exact equality.

use rust_decimal::{Decimal, RoundingStrategy};

/// Absolute tolerance (0.01 currency units) applied to every money comparison.
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Returns true if `amount` is larger than `limit` by more than the tolerance.
///
/// `exceeds_with_tolerance(100.01, 100)` is false, `exceeds_with_tolerance(100.02, 100)` is true.
#[must_use]
pub fn exceeds_with_tolerance(amount: Decimal, limit: Decimal) -> bool {
    amount - limit > MONEY_TOLERANCE
}

/// Returns true if `available` covers `required` once the tolerance is added.
#[must_use]
pub fn covers_with_tolerance(available: Decimal, required: Decimal) -> bool {
    available + MONEY_TOLERANCE >= required
}

/// Formats an amount with exactly two decimals, rounding half away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
