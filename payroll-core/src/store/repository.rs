use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{KpiRecord, PayPeriod, PayslipRecord, SalarySheet};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no {kind} for employee {employee_code} in {period}")]
    NotFound {
        kind: &'static str,
        employee_code: String,
        period: PayPeriod,
    },

    #[error("{kind} for employee {employee_code} in {period} already exists")]
    Duplicate {
        kind: &'static str,
        employee_code: String,
        period: PayPeriod,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Where salary sheets come from and where computed records go.
///
/// The calculators never touch a store; [`crate::PayrollService`] does the
/// lookups and writes around them. Implementations enforce one payslip and
/// one KPI record per employee and period.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    // Inputs
    async fn get_salary_sheet(
        &self,
        employee_code: &str,
        period: PayPeriod,
    ) -> Result<SalarySheet, StoreError>;

    /// Bonus recorded on payroll, compared against the computed KPI amount.
    async fn get_recorded_bonus(
        &self,
        employee_code: &str,
        period: PayPeriod,
    ) -> Result<Decimal, StoreError>;

    // Payslips
    async fn save_payslip(
        &self,
        record: PayslipRecord,
    ) -> Result<(), StoreError>;

    async fn list_payslips(
        &self,
        period: PayPeriod,
    ) -> Result<Vec<PayslipRecord>, StoreError>;

    // KPI results
    async fn save_kpi_result(
        &self,
        record: KpiRecord,
    ) -> Result<(), StoreError>;

    async fn list_kpi_results(
        &self,
        period: PayPeriod,
    ) -> Result<Vec<KpiRecord>, StoreError>;
}
