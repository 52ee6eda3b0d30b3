use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_to_unit;
use crate::models::SalaryType;
use crate::models::tax_bracket::BRACKET_COUNT;

/// Raw inputs for one employee's monthly payslip.
///
/// Overtime amounts arrive with their 150% / 200% / 300% multipliers already
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Contractual monthly salary.
    pub gross_salary: Decimal,

    /// Days worked this month. Half days are allowed.
    pub working_days: Decimal,

    pub kpi_bonus: Decimal,
    pub overtime_1_5: Decimal,
    pub overtime_2: Decimal,
    pub overtime_3: Decimal,

    /// Capped salary base for the mandatory insurance lines. Independent of
    /// gross salary.
    pub insurance_base: Decimal,

    pub dependent_count: u32,

    /// Advance already paid out this month.
    pub advance_payment: Decimal,

    pub salary_type: SalaryType,
}

/// Employer-side insurance contributions (BHDN).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// BHXH, on the insurance base.
    pub social_insurance: Decimal,
    /// TNLD, on the insurance base.
    pub accident_insurance: Decimal,
    /// BHYT, on the insurance base.
    pub health_insurance: Decimal,
    /// BHTN, on gross salary.
    pub unemployment_insurance: Decimal,
    pub total: Decimal,
}

/// Employee-side insurance contributions (BHNLD).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeContributions {
    /// BHXH, on the insurance base.
    pub social_insurance: Decimal,
    /// BHYT, on the insurance base.
    pub health_insurance: Decimal,
    /// BHTN, on gross salary.
    pub unemployment_insurance: Decimal,
    pub total: Decimal,
}

/// Fully itemised payslip.
///
/// Values are kept at full precision. Call [`CompensationResult::rounded`]
/// to get whole currency units for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationResult {
    pub daily_rate: Decimal,
    pub daily_salary: Decimal,

    /// Daily salary plus KPI bonus and all overtime tiers.
    pub total_income: Decimal,

    pub employer: EmployerContributions,

    /// Total income plus employer contributions.
    pub total_company_payment: Decimal,

    pub employee: EmployeeContributions,

    pub personal_deduction: Decimal,
    pub dependent_deduction: Decimal,
    /// Equal to the employee contribution total.
    pub insurance_deduction: Decimal,
    pub total_deduction: Decimal,

    /// Always zero for seasonal workers.
    pub taxable_income: Decimal,

    /// Tax owed on each slice of the progressive schedule, lowest first.
    /// All zero for seasonal workers.
    pub bracket_taxes: [Decimal; BRACKET_COUNT],

    pub total_personal_income_tax: Decimal,

    /// Total income less employee contributions and income tax.
    pub net_salary: Decimal,

    /// Net salary less the advance. Negative when the advance exceeds net pay.
    pub actual_payment: Decimal,
}

impl CompensationResult {
    /// Whether the advance already paid exceeds this month's net salary.
    pub fn is_overpaid(&self) -> bool {
        self.actual_payment < Decimal::ZERO
    }

    /// Returns a copy with every amount rounded to whole currency units.
    pub fn rounded(&self) -> Self {
        Self {
            daily_rate: round_to_unit(self.daily_rate),
            daily_salary: round_to_unit(self.daily_salary),
            total_income: round_to_unit(self.total_income),
            employer: EmployerContributions {
                social_insurance: round_to_unit(self.employer.social_insurance),
                accident_insurance: round_to_unit(self.employer.accident_insurance),
                health_insurance: round_to_unit(self.employer.health_insurance),
                unemployment_insurance: round_to_unit(self.employer.unemployment_insurance),
                total: round_to_unit(self.employer.total),
            },
            total_company_payment: round_to_unit(self.total_company_payment),
            employee: EmployeeContributions {
                social_insurance: round_to_unit(self.employee.social_insurance),
                health_insurance: round_to_unit(self.employee.health_insurance),
                unemployment_insurance: round_to_unit(self.employee.unemployment_insurance),
                total: round_to_unit(self.employee.total),
            },
            personal_deduction: round_to_unit(self.personal_deduction),
            dependent_deduction: round_to_unit(self.dependent_deduction),
            insurance_deduction: round_to_unit(self.insurance_deduction),
            total_deduction: round_to_unit(self.total_deduction),
            taxable_income: round_to_unit(self.taxable_income),
            bracket_taxes: self.bracket_taxes.map(round_to_unit),
            total_personal_income_tax: round_to_unit(self.total_personal_income_tax),
            net_salary: round_to_unit(self.net_salary),
            actual_payment: round_to_unit(self.actual_payment),
        }
    }
}
