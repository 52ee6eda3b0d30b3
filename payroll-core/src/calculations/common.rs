//! Shared numeric helpers for the payroll and KPI calculators.
//!
//! Calculators keep full decimal precision throughout; the rounding helpers
//! here are only applied when a result is prepared for display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidInputError;

/// Rounds to whole currency units, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(454545.4545)), dec!(454545));
/// assert_eq!(round_to_unit(dec!(1999.5)), dec!(2000));
/// assert_eq!(round_to_unit(dec!(-1999.5)), dec!(-2000));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to two decimal places, halves away from zero. Used for scores.
pub fn round_to_hundredths(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100), dec!(200)), dec!(200));
/// assert_eq!(max(dec!(-100), dec!(-200)), dec!(-100));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
pub fn floor_at_zero(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// `lhs × rhs`, or [`InvalidInputError::Overflow`] naming `field`.
pub fn checked_mul(
    field: &'static str,
    lhs: Decimal,
    rhs: Decimal,
) -> Result<Decimal, InvalidInputError> {
    lhs.checked_mul(rhs).ok_or(InvalidInputError::Overflow { field })
}

/// `lhs / rhs`. A zero divisor is reported as an overflow of `field`.
pub fn checked_div(
    field: &'static str,
    lhs: Decimal,
    rhs: Decimal,
) -> Result<Decimal, InvalidInputError> {
    lhs.checked_div(rhs).ok_or(InvalidInputError::Overflow { field })
}

pub fn checked_sub(
    field: &'static str,
    lhs: Decimal,
    rhs: Decimal,
) -> Result<Decimal, InvalidInputError> {
    lhs.checked_sub(rhs).ok_or(InvalidInputError::Overflow { field })
}

/// Sums `values`, failing with [`InvalidInputError::Overflow`] instead of
/// panicking.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::checked_sum;
///
/// assert_eq!(checked_sum("total", [dec!(1), dec!(2.5)]), Ok(dec!(3.5)));
/// assert!(checked_sum("total", [Decimal::MAX, dec!(1)]).is_err());
/// ```
pub fn checked_sum(
    field: &'static str,
    values: impl IntoIterator<Item = Decimal>,
) -> Result<Decimal, InvalidInputError> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).ok_or(InvalidInputError::Overflow { field })
    })
}
