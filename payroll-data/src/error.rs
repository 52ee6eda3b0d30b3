use payroll_core::{InvalidInputError, PayPeriod};
use thiserror::Error;

/// Errors that can occur while loading salary or KPI sheets.
///
/// Row numbers are 1-based and count data rows only (the header is row 0).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV is structurally invalid or a cell has the wrong type.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unrecognised salary type '{value}' on row {row}")]
    InvalidSalaryType { value: String, row: usize },

    #[error("unrecognised rating '{value}' for {field} on row {row}")]
    InvalidRating {
        field: &'static str,
        value: String,
        row: usize,
    },

    /// Two rows name the same employee and pay period.
    #[error("duplicate salary sheet for {employee_code} in {period} on row {row}, first seen on row {first_row}")]
    DuplicateSheet {
        employee_code: String,
        period: PayPeriod,
        row: usize,
        first_row: usize,
    },

    /// A value parsed but lies outside the engine's domain.
    #[error("row {row}: {source}")]
    InvalidInput {
        row: usize,
        #[source]
        source: InvalidInputError,
    },
}

impl LoadError {
    pub(crate) fn at_row(row: usize) -> impl FnOnce(InvalidInputError) -> Self {
        move |source| LoadError::InvalidInput { row, source }
    }
}
