use rust_decimal::Decimal;
use thiserror::Error;

/// Raised when a calculator is handed a value outside its valid domain.
///
/// This is the only failure either calculator produces. Each variant names the
/// offending field so callers can point the user at the right form input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// A money amount, rate or count was below zero.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    /// A count field carried a fractional part.
    #[error("{field} must be a whole number, got {value}")]
    NonInteger { field: &'static str, value: Decimal },

    /// A count field does not fit the supported range.
    #[error("{field} is too large, got {value}")]
    CountOverflow { field: &'static str, value: Decimal },

    /// A statutory rate fell outside `[0, 1]`, or a divisor was not positive.
    #[error("{field} is out of range, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// An intermediate amount exceeded the range of [`Decimal`].
    #[error("{field} is too large to compute")]
    Overflow { field: &'static str },

    /// The month/year pair does not name a calendar month.
    #[error("invalid pay period {month}/{year}")]
    InvalidPeriod { month: u32, year: i32 },
}
