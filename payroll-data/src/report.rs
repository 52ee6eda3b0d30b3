//! Writers for computed payslips and KPI verdicts.
//!
//! CSV output is flat, one row per employee, with the per-bracket taxes
//! spread across `tax_bracket_1` .. `tax_bracket_7`. JSON output keeps the
//! nested record structure.

use std::io::Write;

use payroll_core::{KpiRecord, PayslipRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::config::OutputFormat;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct PayslipRow<'a> {
    employee_code: &'a str,
    period: String,
    salary_type: &'static str,
    daily_rate: Decimal,
    daily_salary: Decimal,
    total_income: Decimal,
    employer_bhxh: Decimal,
    employer_tnld: Decimal,
    employer_bhyt: Decimal,
    employer_bhtn: Decimal,
    employer_total: Decimal,
    total_company_payment: Decimal,
    employee_bhxh: Decimal,
    employee_bhyt: Decimal,
    employee_bhtn: Decimal,
    employee_total: Decimal,
    personal_deduction: Decimal,
    dependent_deduction: Decimal,
    total_deduction: Decimal,
    taxable_income: Decimal,
    tax_bracket_1: Decimal,
    tax_bracket_2: Decimal,
    tax_bracket_3: Decimal,
    tax_bracket_4: Decimal,
    tax_bracket_5: Decimal,
    tax_bracket_6: Decimal,
    tax_bracket_7: Decimal,
    total_personal_income_tax: Decimal,
    net_salary: Decimal,
    advance_payment: Decimal,
    actual_payment: Decimal,
    overpaid: bool,
}

impl<'a> PayslipRow<'a> {
    fn new(
        record: &'a PayslipRecord,
        rounded: bool,
    ) -> Self {
        let r = if rounded {
            record.result.rounded()
        } else {
            record.result.clone()
        };
        let [t1, t2, t3, t4, t5, t6, t7] = r.bracket_taxes;
        Self {
            employee_code: &record.employee_code,
            period: record.period.to_string(),
            salary_type: record.input.salary_type.as_str(),
            daily_rate: r.daily_rate,
            daily_salary: r.daily_salary,
            total_income: r.total_income,
            employer_bhxh: r.employer.social_insurance,
            employer_tnld: r.employer.accident_insurance,
            employer_bhyt: r.employer.health_insurance,
            employer_bhtn: r.employer.unemployment_insurance,
            employer_total: r.employer.total,
            total_company_payment: r.total_company_payment,
            employee_bhxh: r.employee.social_insurance,
            employee_bhyt: r.employee.health_insurance,
            employee_bhtn: r.employee.unemployment_insurance,
            employee_total: r.employee.total,
            personal_deduction: r.personal_deduction,
            dependent_deduction: r.dependent_deduction,
            total_deduction: r.total_deduction,
            taxable_income: r.taxable_income,
            tax_bracket_1: t1,
            tax_bracket_2: t2,
            tax_bracket_3: t3,
            tax_bracket_4: t4,
            tax_bracket_5: t5,
            tax_bracket_6: t6,
            tax_bracket_7: t7,
            total_personal_income_tax: r.total_personal_income_tax,
            net_salary: r.net_salary,
            advance_payment: record.input.advance_payment,
            actual_payment: r.actual_payment,
            overpaid: r.is_overpaid(),
        }
    }
}

#[derive(Debug, Serialize)]
struct KpiRow<'a> {
    employee_code: &'a str,
    period: String,
    basic_salary: Decimal,
    productivity: Decimal,
    quality: Decimal,
    attitude: Decimal,
    progress: Decimal,
    requirements: Decimal,
    recruitment: Decimal,
    revenue_bonus: Decimal,
    kpi_coefficient: Decimal,
    total_monthly_kpi: Decimal,
    recorded_bonus: Decimal,
    has_kpi_gap: bool,
}

impl<'a> KpiRow<'a> {
    fn new(
        record: &'a KpiRecord,
        rounded: bool,
    ) -> Self {
        let r = if rounded {
            record.result.rounded()
        } else {
            record.result.clone()
        };
        Self {
            employee_code: record.employee_code(),
            period: record.period.to_string(),
            basic_salary: record.input.basic_salary,
            productivity: r.productivity,
            quality: r.quality,
            attitude: r.attitude,
            progress: r.progress,
            requirements: r.requirements,
            recruitment: r.recruitment,
            revenue_bonus: r.revenue_bonus,
            kpi_coefficient: r.kpi_coefficient,
            total_monthly_kpi: r.total_monthly_kpi,
            recorded_bonus: record.input.recorded_bonus,
            has_kpi_gap: r.has_kpi_gap,
        }
    }
}

fn rounded_payslip(record: &PayslipRecord) -> PayslipRecord {
    PayslipRecord {
        result: record.result.rounded(),
        ..record.clone()
    }
}

fn rounded_kpi(record: &KpiRecord) -> KpiRecord {
    KpiRecord {
        result: record.result.rounded(),
        ..record.clone()
    }
}

/// Writes payslips in `format`. With `rounded`, amounts are shown in whole
/// currency units.
pub fn write_payslips<W: Write>(
    writer: W,
    records: &[PayslipRecord],
    format: OutputFormat,
    rounded: bool,
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(PayslipRow::new(record, rounded))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            let records: Vec<PayslipRecord> = if rounded {
                records.iter().map(rounded_payslip).collect()
            } else {
                records.to_vec()
            };
            write_json(writer, &records)?;
        }
    }
    Ok(())
}

/// Writes KPI verdicts in `format`. With `rounded`, scores are shown to two
/// decimals and money in whole units.
pub fn write_kpi_results<W: Write>(
    writer: W,
    records: &[KpiRecord],
    format: OutputFormat,
    rounded: bool,
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for record in records {
                csv_writer.serialize(KpiRow::new(record, rounded))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            let records: Vec<KpiRecord> = if rounded {
                records.iter().map(rounded_kpi).collect()
            } else {
                records.to_vec()
            };
            write_json(writer, &records)?;
        }
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(
    mut writer: W,
    value: &T,
) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}
