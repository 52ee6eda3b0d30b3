//! Glue between the record store and the calculators.
//!
//! The service fetches inputs, runs the pure calculators and persists what
//! they return. Everything that can fail here is either a store error or an
//! input the calculators reject.

use thiserror::Error;
use tracing::info;

use crate::calculations::{CompensationCalculator, KpiCoefficientCalculator};
use crate::error::InvalidInputError;
use crate::models::{KpiInput, KpiRecord, KpiScores, PayPeriod, PayslipRecord};
use crate::store::{PayrollStore, StoreError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

pub struct PayrollService<S> {
    store: S,
    compensation: CompensationCalculator,
    kpi: KpiCoefficientCalculator,
}

impl<S: PayrollStore> PayrollService<S> {
    /// Uses the standard statutory rates.
    pub fn new(store: S) -> Self {
        Self::with_calculator(store, CompensationCalculator::default())
    }

    pub fn with_calculator(
        store: S,
        compensation: CompensationCalculator,
    ) -> Self {
        Self {
            store,
            compensation,
            kpi: KpiCoefficientCalculator,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Computes and stores the payslip for one employee and period.
    ///
    /// # Errors
    ///
    /// * [`StoreError::NotFound`] when there is no salary sheet.
    /// * [`StoreError::Duplicate`] when a payslip was already stored.
    /// * [`InvalidInputError`] when the sheet holds invalid values.
    pub async fn run_payslip(
        &self,
        employee_code: &str,
        period: PayPeriod,
    ) -> Result<PayslipRecord, ServiceError> {
        let sheet = self.store.get_salary_sheet(employee_code, period).await?;
        let result = self.compensation.calculate(&sheet.input)?;

        let record = PayslipRecord {
            employee_code: sheet.employee_code,
            period,
            input: sheet.input,
            result,
        };
        self.store.save_payslip(record.clone()).await?;

        info!(
            employee = employee_code,
            %period,
            net_salary = %record.result.net_salary,
            "payslip stored"
        );
        Ok(record)
    }

    /// Evaluates and stores the KPI verdict for one employee and period.
    ///
    /// The basic salary is the gross salary from the employee's salary sheet;
    /// the recorded bonus comes from the store.
    ///
    /// # Errors
    ///
    /// Same as [`PayrollService::run_payslip`].
    pub async fn evaluate_kpi(
        &self,
        employee_code: &str,
        period: PayPeriod,
        scores: KpiScores,
    ) -> Result<KpiRecord, ServiceError> {
        let sheet = self.store.get_salary_sheet(employee_code, period).await?;
        let recorded_bonus = self.store.get_recorded_bonus(employee_code, period).await?;

        let input = KpiInput {
            employee_code: employee_code.to_string(),
            basic_salary: sheet.input.gross_salary,
            recorded_bonus,
            scores,
        };
        let result = self.kpi.calculate(&input)?;

        let record = KpiRecord {
            period,
            input,
            result,
        };
        self.store.save_kpi_result(record.clone()).await?;

        info!(
            employee = employee_code,
            %period,
            coefficient = %record.result.kpi_coefficient,
            gap = record.result.has_kpi_gap,
            "KPI result stored"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{CompensationInput, SalarySheet, SalaryType};

    // ── stub store ──────────────────────────────────────────────────────
    // Holds a single salary sheet and records every write.
    struct StubStore {
        sheet: SalarySheet,
        payslips: Mutex<Vec<PayslipRecord>>,
        kpi_results: Mutex<Vec<KpiRecord>>,
    }

    impl StubStore {
        fn new(sheet: SalarySheet) -> Self {
            Self {
                sheet,
                payslips: Mutex::new(Vec::new()),
                kpi_results: Mutex::new(Vec::new()),
            }
        }

        fn not_found(
            &self,
            employee_code: &str,
            period: PayPeriod,
        ) -> StoreError {
            StoreError::NotFound {
                kind: "salary sheet",
                employee_code: employee_code.to_string(),
                period,
            }
        }
    }

    #[async_trait]
    impl PayrollStore for StubStore {
        async fn get_salary_sheet(
            &self,
            employee_code: &str,
            period: PayPeriod,
        ) -> Result<SalarySheet, StoreError> {
            if employee_code == self.sheet.employee_code && period == self.sheet.period {
                Ok(self.sheet.clone())
            } else {
                Err(self.not_found(employee_code, period))
            }
        }

        async fn get_recorded_bonus(
            &self,
            employee_code: &str,
            period: PayPeriod,
        ) -> Result<Decimal, StoreError> {
            self.get_salary_sheet(employee_code, period)
                .await
                .map(|sheet| sheet.input.kpi_bonus)
        }

        async fn save_payslip(
            &self,
            record: PayslipRecord,
        ) -> Result<(), StoreError> {
            self.payslips.lock().unwrap().push(record);
            Ok(())
        }

        async fn list_payslips(
            &self,
            _period: PayPeriod,
        ) -> Result<Vec<PayslipRecord>, StoreError> {
            Ok(self.payslips.lock().unwrap().clone())
        }

        async fn save_kpi_result(
            &self,
            record: KpiRecord,
        ) -> Result<(), StoreError> {
            self.kpi_results.lock().unwrap().push(record);
            Ok(())
        }

        async fn list_kpi_results(
            &self,
            _period: PayPeriod,
        ) -> Result<Vec<KpiRecord>, StoreError> {
            Ok(self.kpi_results.lock().unwrap().clone())
        }
    }

    fn period() -> PayPeriod {
        PayPeriod::new(2025, 6).unwrap()
    }

    fn sheet(gross_salary: Decimal) -> SalarySheet {
        SalarySheet {
            employee_code: "NV007".to_string(),
            period: period(),
            input: CompensationInput {
                gross_salary,
                working_days: dec!(22),
                kpi_bonus: dec!(40000000),
                overtime_1_5: dec!(0),
                overtime_2: dec!(0),
                overtime_3: dec!(0),
                insurance_base: gross_salary,
                dependent_count: 0,
                advance_payment: dec!(0),
                salary_type: SalaryType::WithInsurance,
            },
        }
    }

    #[tokio::test]
    async fn run_payslip_computes_and_stores() {
        let service = PayrollService::new(StubStore::new(sheet(dec!(22000000))));

        let record = service.run_payslip("NV007", period()).await.unwrap();

        assert_eq!(record.result.total_income, dec!(62000000));
        let stored = service.store().list_payslips(period()).await.unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[tokio::test]
    async fn run_payslip_reports_missing_sheet() {
        let service = PayrollService::new(StubStore::new(sheet(dec!(22000000))));

        let result = service.run_payslip("NV999", period()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Store(StoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn run_payslip_rejects_invalid_sheet_without_storing() {
        let service = PayrollService::new(StubStore::new(sheet(dec!(-5))));

        let result = service.run_payslip("NV007", period()).await;

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
        assert!(service.store().list_payslips(period()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn evaluate_kpi_uses_sheet_salary_and_recorded_bonus() {
        let service = PayrollService::new(StubStore::new(sheet(dec!(10000000))));

        let record = service
            .evaluate_kpi("NV007", period(), KpiScores::default())
            .await
            .unwrap();

        assert_eq!(record.input.basic_salary, dec!(10000000));
        assert_eq!(record.input.recorded_bonus, dec!(40000000));
        assert_eq!(record.result.total_monthly_kpi, dec!(40000000));
        assert!(!record.result.has_kpi_gap);
        assert_eq!(
            service.store().list_kpi_results(period()).await.unwrap().len(),
            1
        );
    }
}
