//! Payslip calculation: gross pay to itemised net pay.
//!
//! # Calculation order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Daily rate: gross salary / 22 |
//! | 2    | Daily salary: daily rate × working days |
//! | 3    | Total income: daily salary + KPI bonus + overtime (150%, 200%, 300%) |
//! | 4    | Insurance lines for both sides (zero for seasonal workers) |
//! | 5    | Total company payment: total income + employer contributions |
//! | 6    | Deductions: personal + dependents + employee insurance |
//! | 7    | Income tax: progressive schedule, or flat 10% for seasonal workers |
//! | 8    | Net salary: total income − employee insurance − income tax |
//! | 9    | Actual payment: net salary − advance |
//!
//! Nothing is rounded along the way. Use [`CompensationResult::rounded`] for
//! display.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::{CompensationInput, SalaryType, compute_compensation};
//!
//! let input = CompensationInput {
//!     gross_salary: dec!(22000000),
//!     working_days: dec!(22),
//!     kpi_bonus: dec!(0),
//!     overtime_1_5: dec!(0),
//!     overtime_2: dec!(0),
//!     overtime_3: dec!(0),
//!     insurance_base: dec!(22000000),
//!     dependent_count: 0,
//!     advance_payment: dec!(0),
//!     salary_type: SalaryType::WithInsurance,
//! };
//!
//! let payslip = compute_compensation(&input).unwrap();
//!
//! assert_eq!(payslip.taxable_income, dec!(8690000));
//! assert_eq!(payslip.total_personal_income_tax, dec!(619000));
//! assert_eq!(payslip.net_salary, dec!(19071000));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{
    checked_div, checked_mul, checked_sub, checked_sum, floor_at_zero,
};
use crate::error::InvalidInputError;
use crate::models::{
    BRACKET_COUNT, CompensationInput, CompensationResult, EmployeeContributions,
    EmployerContributions, PIT_BRACKETS, SalaryType, StatutoryRates,
};
use crate::validation::ensure_non_negative;

/// Turns a [`CompensationInput`] into a [`CompensationResult`].
///
/// Stateless apart from its rate table, so one instance can be shared across
/// threads and reused for any number of payslips.
#[derive(Debug, Clone, Default)]
pub struct CompensationCalculator {
    rates: StatutoryRates,
}

impl CompensationCalculator {
    /// Creates a calculator with a custom rate table.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if [`StatutoryRates::validate`] fails.
    pub fn new(rates: StatutoryRates) -> Result<Self, InvalidInputError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Computes the full payslip.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Negative`] if any amount or the number of
    /// working days is negative, and [`InvalidInputError::Overflow`] if an
    /// amount is too large to carry through the calculation. No partial
    /// result is produced.
    pub fn calculate(
        &self,
        input: &CompensationInput,
    ) -> Result<CompensationResult, InvalidInputError> {
        validate_input(input)?;

        let daily_rate = self.daily_rate(input.gross_salary)?;
        let daily_salary = self.daily_salary(input.gross_salary, input.working_days)?;
        let total_income = self.total_income(daily_salary, input)?;

        let (employer, employee) = if input.salary_type.is_insured() {
            (
                self.employer_contributions(input.gross_salary, input.insurance_base)?,
                self.employee_contributions(input.gross_salary, input.insurance_base)?,
            )
        } else {
            (
                EmployerContributions::default(),
                EmployeeContributions::default(),
            )
        };

        let total_company_payment =
            checked_sum("total_company_payment", [total_income, employer.total])?;

        let personal_deduction = self.rates.personal_deduction;
        let dependent_deduction = self.dependent_deduction(input.dependent_count)?;
        let insurance_deduction = employee.total;
        let total_deduction = checked_sum(
            "total_deduction",
            [personal_deduction, dependent_deduction, insurance_deduction],
        )?;

        let (taxable_income, bracket_taxes, total_personal_income_tax) = match input.salary_type {
            SalaryType::Seasonal => (
                Decimal::ZERO,
                [Decimal::ZERO; BRACKET_COUNT],
                self.seasonal_withholding(total_income)?,
            ),
            SalaryType::WithInsurance => {
                let taxable_income =
                    floor_at_zero(checked_sub("taxable_income", total_income, total_deduction)?);
                let bracket_taxes = progressive_tax(taxable_income);
                let total: Decimal = bracket_taxes.iter().sum();
                (taxable_income, bracket_taxes, total)
            }
        };

        let net_salary = checked_sub(
            "net_salary",
            checked_sub("net_salary", total_income, employee.total)?,
            total_personal_income_tax,
        )?;
        let actual_payment = checked_sub("actual_payment", net_salary, input.advance_payment)?;

        debug!(
            salary_type = input.salary_type.as_str(),
            %total_income,
            %taxable_income,
            %total_personal_income_tax,
            %net_salary,
            "computed payslip"
        );
        if actual_payment < Decimal::ZERO {
            warn!(
                %net_salary,
                advance = %input.advance_payment,
                "advance exceeds net salary"
            );
        }

        Ok(CompensationResult {
            daily_rate,
            daily_salary,
            total_income,
            employer,
            total_company_payment,
            employee,
            personal_deduction,
            dependent_deduction,
            insurance_deduction,
            total_deduction,
            taxable_income,
            bracket_taxes,
            total_personal_income_tax,
            net_salary,
            actual_payment,
        })
    }

    fn daily_rate(
        &self,
        gross_salary: Decimal,
    ) -> Result<Decimal, InvalidInputError> {
        checked_div("daily_rate", gross_salary, self.rates.standard_working_days)
    }

    /// Same quantity as `daily_rate × working_days`, divided last so an
    /// exact month does not pick up the repeating remainder of the rate.
    fn daily_salary(
        &self,
        gross_salary: Decimal,
        working_days: Decimal,
    ) -> Result<Decimal, InvalidInputError> {
        checked_div(
            "daily_salary",
            checked_mul("daily_salary", gross_salary, working_days)?,
            self.rates.standard_working_days,
        )
    }

    fn total_income(
        &self,
        daily_salary: Decimal,
        input: &CompensationInput,
    ) -> Result<Decimal, InvalidInputError> {
        checked_sum(
            "total_income",
            [
                daily_salary,
                input.kpi_bonus,
                input.overtime_1_5,
                input.overtime_2,
                input.overtime_3,
            ],
        )
    }

    fn employer_contributions(
        &self,
        gross_salary: Decimal,
        insurance_base: Decimal,
    ) -> Result<EmployerContributions, InvalidInputError> {
        let rates = &self.rates;
        let social_insurance =
            checked_mul("insurance_base", insurance_base, rates.employer_social_insurance)?;
        let accident_insurance =
            checked_mul("insurance_base", insurance_base, rates.employer_accident_insurance)?;
        let health_insurance =
            checked_mul("insurance_base", insurance_base, rates.employer_health_insurance)?;
        let unemployment_insurance =
            checked_mul("gross_salary", gross_salary, rates.employer_unemployment_insurance)?;

        Ok(EmployerContributions {
            social_insurance,
            accident_insurance,
            health_insurance,
            unemployment_insurance,
            total: checked_sum(
                "employer_contributions",
                [
                    social_insurance,
                    accident_insurance,
                    health_insurance,
                    unemployment_insurance,
                ],
            )?,
        })
    }

    fn employee_contributions(
        &self,
        gross_salary: Decimal,
        insurance_base: Decimal,
    ) -> Result<EmployeeContributions, InvalidInputError> {
        let rates = &self.rates;
        let social_insurance =
            checked_mul("insurance_base", insurance_base, rates.employee_social_insurance)?;
        let health_insurance =
            checked_mul("insurance_base", insurance_base, rates.employee_health_insurance)?;
        let unemployment_insurance =
            checked_mul("gross_salary", gross_salary, rates.employee_unemployment_insurance)?;

        Ok(EmployeeContributions {
            social_insurance,
            health_insurance,
            unemployment_insurance,
            total: checked_sum(
                "employee_contributions",
                [social_insurance, health_insurance, unemployment_insurance],
            )?,
        })
    }

    fn dependent_deduction(
        &self,
        dependent_count: u32,
    ) -> Result<Decimal, InvalidInputError> {
        checked_mul(
            "dependent_deduction",
            self.rates.dependent_deduction,
            Decimal::from(dependent_count),
        )
    }

    fn seasonal_withholding(
        &self,
        total_income: Decimal,
    ) -> Result<Decimal, InvalidInputError> {
        checked_mul("total_income", total_income, self.rates.seasonal_withholding_rate)
    }
}

/// Splits `taxable_income` across the progressive schedule and returns the
/// tax owed on each slice, lowest bracket first.
///
/// Each rate applies only to the part of the income that falls inside its
/// bracket.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::compensation::progressive_tax;
///
/// let taxes = progressive_tax(dec!(18000000));
///
/// assert_eq!(taxes[0], dec!(250000));
/// assert_eq!(taxes[1], dec!(500000));
/// assert_eq!(taxes[2], dec!(1200000));
/// assert!(taxes[3..].iter().all(|t| t.is_zero()));
/// ```
pub fn progressive_tax(taxable_income: Decimal) -> [Decimal; BRACKET_COUNT] {
    let mut taxes = [Decimal::ZERO; BRACKET_COUNT];
    let mut floor = Decimal::ZERO;

    for (tax, bracket) in taxes.iter_mut().zip(PIT_BRACKETS.iter()) {
        if taxable_income <= floor {
            break;
        }
        let top = match bracket.ceiling {
            Some(ceiling) => taxable_income.min(ceiling),
            None => taxable_income,
        };
        *tax = (top - floor) * bracket.rate;
        floor = bracket.ceiling.unwrap_or(Decimal::MAX);
    }

    taxes
}

/// Computes a payslip with the standard statutory rates.
///
/// # Errors
///
/// See [`CompensationCalculator::calculate`].
pub fn compute_compensation(
    input: &CompensationInput
) -> Result<CompensationResult, InvalidInputError> {
    CompensationCalculator::default().calculate(input)
}

fn validate_input(input: &CompensationInput) -> Result<(), InvalidInputError> {
    ensure_non_negative("gross_salary", input.gross_salary)?;
    ensure_non_negative("working_days", input.working_days)?;
    ensure_non_negative("kpi_bonus", input.kpi_bonus)?;
    ensure_non_negative("overtime_1_5", input.overtime_1_5)?;
    ensure_non_negative("overtime_2", input.overtime_2)?;
    ensure_non_negative("overtime_3", input.overtime_3)?;
    ensure_non_negative("insurance_base", input.insurance_base)?;
    ensure_non_negative("advance_payment", input.advance_payment)?;
    Ok(())
}
