//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Converted amounts keep 4 decimal places
//! - Stored report totals keep 2 decimal places
//! - Always banker's rounding (round half to even)

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places kept on converted amounts.
pub const RATE_SCALE: u32 = 4;

/// Decimal places kept on stored money totals.
pub const MONEY_SCALE: u32 = 2;

/// Converts an amount into the target currency using the given rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
/// Returns `None` when the product does not fit in a `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|v| v.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointNearestEven))
}

/// Rounds a base-currency total to the precision it is stored with.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_amount() {
        // 100 USD * 36.5 = 3650 VES
        assert_eq!(convert_amount(dec!(100), dec!(36.5)), Some(dec!(3650)));
    }

    #[test]
    fn test_convert_rounds_to_4_decimals() {
        // 100 * 1.23456789 = 123.456789 -> 123.4568
        assert_eq!(convert_amount(dec!(100), dec!(1.23456789)), Some(dec!(123.4568)));
    }

    #[test]
    fn test_bankers_rounding() {
        // 0.00005 sits on the midpoint at 4 places
        assert_eq!(convert_amount(dec!(1), dec!(0.00005)), Some(dec!(0.0000)));
        assert_eq!(convert_amount(dec!(1), dec!(0.00015)), Some(dec!(0.0002)));
        assert_eq!(round_money(dec!(10.125)), dec!(10.12));
        assert_eq!(round_money(dec!(10.135)), dec!(10.14));
    }

    #[test]
    fn test_identity_rate_keeps_amount() {
        assert_eq!(convert_amount(dec!(250.75), Decimal::ONE), Some(dec!(250.75)));
    }

    #[test]
    fn test_overflowing_product_is_none() {
        // 1e19 * 1e13 is past Decimal::MAX (~7.9e28)
        let huge = Decimal::from_i128_with_scale(10_i128.pow(19), 0);
        let rate = Decimal::from_i128_with_scale(10_i128.pow(13), 0);
        assert_eq!(convert_amount(huge, rate), None);
        assert!(convert_amount(Decimal::MAX, dec!(2)).is_none());
    }
}
