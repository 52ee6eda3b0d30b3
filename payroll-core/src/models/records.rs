use serde::Serialize;

use crate::models::{CompensationInput, CompensationResult, KpiInput, KpiResult, PayPeriod};

/// One employee's salary-sheet row for a pay period, as kept by payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalarySheet {
    pub employee_code: String,
    pub period: PayPeriod,
    pub input: CompensationInput,
}

/// A computed payslip together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipRecord {
    pub employee_code: String,
    pub period: PayPeriod,
    pub input: CompensationInput,
    pub result: CompensationResult,
}

/// A KPI verdict together with the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiRecord {
    pub period: PayPeriod,
    pub input: KpiInput,
    pub result: KpiResult,
}

impl KpiRecord {
    pub fn employee_code(&self) -> &str {
        &self.input.employee_code
    }
}
