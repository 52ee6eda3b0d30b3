use std::collections::HashMap;

use async_trait::async_trait;
use payroll_core::{KpiRecord, PayPeriod, PayrollStore, PayslipRecord, SalarySheet, StoreError};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

type Key = (String, PayPeriod);

/// In-process [`PayrollStore`] backed by hash maps.
///
/// Used by the CLI, which loads sheets from CSV, and by tests. Nothing is
/// persisted.
#[derive(Default)]
pub struct MemoryStore {
    sheets: RwLock<HashMap<Key, SalarySheet>>,
    payslips: RwLock<HashMap<Key, PayslipRecord>>,
    kpi_results: RwLock<HashMap<Key, KpiRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds salary sheets. All or nothing: if any sheet collides with a
    /// stored one, or with another sheet in the same batch, nothing is added.
    ///
    /// # Errors
    ///
    /// [`StoreError::Duplicate`] for the first colliding employee and period.
    pub async fn insert_sheets(
        &self,
        sheets: impl IntoIterator<Item = SalarySheet>,
    ) -> Result<(), StoreError> {
        let mut map = self.sheets.write().await;
        let mut batch: HashMap<Key, SalarySheet> = HashMap::new();
        for sheet in sheets {
            let key = key(&sheet.employee_code, sheet.period);
            if map.contains_key(&key) || batch.contains_key(&key) {
                return Err(StoreError::Duplicate {
                    kind: "salary sheet",
                    employee_code: sheet.employee_code,
                    period: sheet.period,
                });
            }
            batch.insert(key, sheet);
        }
        map.extend(batch);
        debug!(count = map.len(), "salary sheets loaded");
        Ok(())
    }

    /// Every sheet for `period`, ordered by employee code.
    pub async fn sheets_for(
        &self,
        period: PayPeriod,
    ) -> Vec<SalarySheet> {
        let map = self.sheets.read().await;
        let mut sheets: Vec<SalarySheet> = map
            .values()
            .filter(|sheet| sheet.period == period)
            .cloned()
            .collect();
        sheets.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));
        sheets
    }

    /// Distinct periods that have at least one sheet, oldest first.
    pub async fn periods(&self) -> Vec<PayPeriod> {
        let map = self.sheets.read().await;
        let mut periods: Vec<PayPeriod> = map.keys().map(|(_, period)| *period).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }
}

fn key(
    employee_code: &str,
    period: PayPeriod,
) -> Key {
    (employee_code.to_string(), period)
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn get_salary_sheet(
        &self,
        employee_code: &str,
        period: PayPeriod,
    ) -> Result<SalarySheet, StoreError> {
        self.sheets
            .read()
            .await
            .get(&key(employee_code, period))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: "salary sheet",
                employee_code: employee_code.to_string(),
                period,
            })
    }

    /// The KPI bonus already entered on the salary sheet.
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
        let mut map = self.payslips.write().await;
        let key = key(&record.employee_code, record.period);
        if map.contains_key(&key) {
            return Err(StoreError::Duplicate {
                kind: "payslip",
                employee_code: record.employee_code,
                period: record.period,
            });
        }
        map.insert(key, record);
        Ok(())
    }

    async fn list_payslips(
        &self,
        period: PayPeriod,
    ) -> Result<Vec<PayslipRecord>, StoreError> {
        let map = self.payslips.read().await;
        let mut records: Vec<PayslipRecord> = map
            .values()
            .filter(|record| record.period == period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_code.cmp(&b.employee_code));
        Ok(records)
    }

    async fn save_kpi_result(
        &self,
        record: KpiRecord,
    ) -> Result<(), StoreError> {
        let mut map = self.kpi_results.write().await;
        let key = key(record.employee_code(), record.period);
        if map.contains_key(&key) {
            return Err(StoreError::Duplicate {
                kind: "KPI result",
                employee_code: record.employee_code().to_string(),
                period: record.period,
            });
        }
        map.insert(key, record);
        Ok(())
    }

    async fn list_kpi_results(
        &self,
        period: PayPeriod,
    ) -> Result<Vec<KpiRecord>, StoreError> {
        let map = self.kpi_results.read().await;
        let mut records: Vec<KpiRecord> = map
            .values()
            .filter(|record| record.period == period)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_code().cmp(b.employee_code()));
        Ok(records)
    }
}
