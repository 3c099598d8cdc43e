//! Currency rounding.
//!
//! Every line item is rounded to a whole currency unit on its own, half-up,
//! as soon as it is computed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to the nearest whole currency unit, halves rounding up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("27777.78").unwrap()), Decimal::from(27778));
/// assert_eq!(round_currency(Decimal::from_str("0.5").unwrap()), Decimal::ONE);
/// assert_eq!(round_currency(Decimal::from_str("0.49").unwrap()), Decimal::ZERO);
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
