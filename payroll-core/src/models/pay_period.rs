use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::InvalidInputError;

/// Calendar month a payslip or KPI evaluation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

impl PayPeriod {
    /// # Errors
    ///
    /// [`InvalidInputError::InvalidPeriod`] when `month` is not `1..=12` or
    /// the year is outside the calendar range chrono supports.
    pub fn new(
        year: i32,
        month: u32,
    ) -> Result<Self, InvalidInputError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(InvalidInputError::InvalidPeriod { month, year })?;
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
