use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::validation::{ensure_non_negative, ensure_rate};

/// Statutory insurance rates, family deductions and payroll conventions.
///
/// [`StatutoryRates::standard`] carries the rates currently in force and is
/// what [`Default`] returns. Deserialising a partial table (for example a
/// `[rates]` section in a config file) keeps the standard value for every
/// field that is left out.
///
/// Employer and employee unemployment insurance (BHTN) is assessed on gross
/// salary; every other insurance line is assessed on the insurance base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatutoryRates {
    /// Employer social insurance (BHXH).
    pub employer_social_insurance: Decimal,
    /// Employer occupational-accident insurance (TNLD).
    pub employer_accident_insurance: Decimal,
    /// Employer health insurance (BHYT).
    pub employer_health_insurance: Decimal,
    /// Employer unemployment insurance (BHTN).
    pub employer_unemployment_insurance: Decimal,

    /// Employee social insurance (BHXH).
    pub employee_social_insurance: Decimal,
    /// Employee health insurance (BHYT).
    pub employee_health_insurance: Decimal,
    /// Employee unemployment insurance (BHTN).
    pub employee_unemployment_insurance: Decimal,

    /// Flat personal deduction, granted regardless of salary type.
    pub personal_deduction: Decimal,
    /// Deduction per registered dependent.
    pub dependent_deduction: Decimal,
    /// Flat withholding rate on total income for seasonal workers.
    pub seasonal_withholding_rate: Decimal,
    /// Divisor that turns a monthly gross salary into a daily rate.
    pub standard_working_days: Decimal,
}

impl StatutoryRates {
    pub fn standard() -> Self {
        Self {
            employer_social_insurance: dec!(0.17),
            employer_accident_insurance: dec!(0.005),
            employer_health_insurance: dec!(0.03),
            employer_unemployment_insurance: dec!(0.01),
            employee_social_insurance: dec!(0.08),
            employee_health_insurance: dec!(0.015),
            employee_unemployment_insurance: dec!(0.01),
            personal_deduction: dec!(11000000),
            dependent_deduction: dec!(4400000),
            seasonal_withholding_rate: dec!(0.10),
            standard_working_days: dec!(22),
        }
    }

    /// Checks that every rate lies in `[0, 1]`, deductions are non-negative and
    /// the working-day divisor is positive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as [`InvalidInputError`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use payroll_core::{InvalidInputError, StatutoryRates};
    ///
    /// let rates = StatutoryRates {
    ///     employee_social_insurance: dec!(8),
    ///     ..StatutoryRates::standard()
    /// };
    ///
    /// assert_eq!(
    ///     rates.validate(),
    ///     Err(InvalidInputError::RateOutOfRange {
    ///         field: "employee_social_insurance",
    ///         value: dec!(8),
    ///     })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let rates = [
            ("employer_social_insurance", self.employer_social_insurance),
            ("employer_accident_insurance", self.employer_accident_insurance),
            ("employer_health_insurance", self.employer_health_insurance),
            (
                "employer_unemployment_insurance",
                self.employer_unemployment_insurance,
            ),
            ("employee_social_insurance", self.employee_social_insurance),
            ("employee_health_insurance", self.employee_health_insurance),
            (
                "employee_unemployment_insurance",
                self.employee_unemployment_insurance,
            ),
            ("seasonal_withholding_rate", self.seasonal_withholding_rate),
        ];
        for (field, rate) in rates {
            ensure_rate(field, rate)?;
        }

        ensure_non_negative("personal_deduction", self.personal_deduction)?;
        ensure_non_negative("dependent_deduction", self.dependent_deduction)?;

        if self.standard_working_days <= Decimal::ZERO {
            return Err(InvalidInputError::RateOutOfRange {
                field: "standard_working_days",
                value: self.standard_working_days,
            });
        }
        Ok(())
    }
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standard_rates_are_valid() {
        assert_eq!(StatutoryRates::standard().validate(), Ok(()));
    }

    #[test]
    fn default_is_standard() {
        assert_eq!(StatutoryRates::default(), StatutoryRates::standard());
    }

    #[test]
    fn validate_rejects_negative_rate() {
        let rates = StatutoryRates {
            employer_health_insurance: dec!(-0.03),
            ..StatutoryRates::standard()
        };

        assert_eq!(
            rates.validate(),
            Err(InvalidInputError::RateOutOfRange {
                field: "employer_health_insurance",
                value: dec!(-0.03),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_deduction() {
        let rates = StatutoryRates {
            dependent_deduction: dec!(-1),
            ..StatutoryRates::standard()
        };

        assert_eq!(
            rates.validate(),
            Err(InvalidInputError::Negative {
                field: "dependent_deduction",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn validate_rejects_zero_working_days() {
        let rates = StatutoryRates {
            standard_working_days: dec!(0),
            ..StatutoryRates::standard()
        };

        assert!(matches!(
            rates.validate(),
            Err(InvalidInputError::RateOutOfRange {
                field: "standard_working_days",
                ..
            })
        ));
    }
}
