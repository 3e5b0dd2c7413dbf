//! Money rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to 2 decimal places, midpoint away from zero.
///
/// Applied at every money boundary so that intermediate precision never
/// leaks into amounts, clamps, or totals.
///
/// # Example
///
/// ```
/// use deduction_engine::deduction::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let raw = Decimal::from_str("136.3636363636").unwrap();
/// assert_eq!(round_money(raw), Decimal::from_str("136.36").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
