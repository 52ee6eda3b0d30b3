//! Boundary checks for raw values entering the engine.
//!
//! The calculators accept typed inputs, but values usually arrive as CSV
//! cells. These helpers turn them into the engine's types and reject anything
//! outside the valid domain with [`InvalidInputError`] instead of clamping it.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::InvalidInputError;

/// Fails with [`InvalidInputError::Negative`] when `value` is below zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::validation::ensure_non_negative;
///
/// assert!(ensure_non_negative("gross_salary", dec!(0)).is_ok());
/// assert!(ensure_non_negative("gross_salary", dec!(-1)).is_err());
/// ```
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), InvalidInputError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(InvalidInputError::Negative { field, value });
    }
    Ok(())
}

/// Converts a decimal cell into a whole, non-negative count.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::validation::count;
///
/// assert_eq!(count("dependent_count", dec!(2)), Ok(2));
/// assert!(count("dependent_count", dec!(1.5)).is_err());
/// ```
pub fn count(
    field: &'static str,
    value: Decimal,
) -> Result<u32, InvalidInputError> {
    ensure_non_negative(field, value)?;
    if !value.fract().is_zero() {
        return Err(InvalidInputError::NonInteger { field, value });
    }
    value
        .to_u32()
        .ok_or(InvalidInputError::CountOverflow { field, value })
}

/// Fails with [`InvalidInputError::RateOutOfRange`] unless `0 <= rate <= 1`.
pub fn ensure_rate(
    field: &'static str,
    rate: Decimal,
) -> Result<(), InvalidInputError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(InvalidInputError::RateOutOfRange { field, value: rate });
    }
    Ok(())
}
