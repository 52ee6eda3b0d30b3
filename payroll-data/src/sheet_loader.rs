//! CSV loader for monthly salary sheets.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column            | Required | Type    | Notes                                  |
//! |-------------------|----------|---------|----------------------------------------|
//! | `employee_code`   | yes      | string  | e.g. `NV001`                           |
//! | `year`            | yes      | integer | e.g. `2025`                            |
//! | `month`           | yes      | integer | `1`–`12`                               |
//! | `salary_type`     | yes      | string  | `with_insurance` or `seasonal`         |
//! | `gross_salary`    | yes      | decimal |                                        |
//! | `working_days`    | yes      | decimal | half days allowed, e.g. `21.5`         |
//! | `insurance_base`  | yes      | decimal |                                        |
//! | `kpi_bonus`       | no       | decimal | empty cell means `0`                   |
//! | `overtime_1_5`    | no       | decimal | 150% tier, multiplier already applied  |
//! | `overtime_2`      | no       | decimal | 200% tier                              |
//! | `overtime_3`      | no       | decimal | 300% tier                              |
//! | `dependent_count` | no       | integer |                                        |
//! | `advance_payment` | no       | decimal |                                        |
//!
//! ### Minimal example
//!
//! ```csv
//! employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
//! NV001,2025,6,with_insurance,22000000,22,22000000
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use payroll_core::validation::count;
use payroll_core::{CompensationInput, PayPeriod, SalarySheet, SalaryType};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct SheetRow {
    employee_code: String,
    year: i32,
    month: u32,
    salary_type: String,
    gross_salary: Decimal,
    working_days: Decimal,
    insurance_base: Decimal,
    kpi_bonus: Option<Decimal>,
    overtime_1_5: Option<Decimal>,
    overtime_2: Option<Decimal>,
    overtime_3: Option<Decimal>,
    dependent_count: Option<Decimal>,
    advance_payment: Option<Decimal>,
}

fn convert_row(
    row: SheetRow,
    row_number: usize,
) -> Result<SalarySheet, LoadError> {
    let salary_type =
        SalaryType::parse(&row.salary_type).ok_or_else(|| LoadError::InvalidSalaryType {
            value: row.salary_type.clone(),
            row: row_number,
        })?;

    let period = PayPeriod::new(row.year, row.month).map_err(LoadError::at_row(row_number))?;
    let dependent_count = count("dependent_count", row.dependent_count.unwrap_or_default())
        .map_err(LoadError::at_row(row_number))?;

    Ok(SalarySheet {
        employee_code: row.employee_code,
        period,
        input: CompensationInput {
            gross_salary: row.gross_salary,
            working_days: row.working_days,
            kpi_bonus: row.kpi_bonus.unwrap_or_default(),
            overtime_1_5: row.overtime_1_5.unwrap_or_default(),
            overtime_2: row.overtime_2.unwrap_or_default(),
            overtime_3: row.overtime_3.unwrap_or_default(),
            insurance_base: row.insurance_base,
            dependent_count,
            advance_payment: row.advance_payment.unwrap_or_default(),
            salary_type,
        },
    })
}

/// Parses salary sheets from any reader. Rows are returned in file order.
///
/// Amounts are not range-checked here; the calculator rejects negative
/// values when the payslip is computed.
///
/// # Errors
///
/// * [`LoadError::Csv`] if the CSV is malformed or a required column is missing.
/// * [`LoadError::InvalidSalaryType`] for an unknown salary type code.
/// * [`LoadError::InvalidInput`] for a bad period or dependent count.
/// * [`LoadError::DuplicateSheet`] when an employee appears twice in a period.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<SalarySheet>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let mut seen: HashMap<(String, PayPeriod), usize> = HashMap::new();
    let mut sheets = Vec::new();
    for (idx, result) in reader.deserialize::<SheetRow>().enumerate() {
        let row_number = idx + 1;
        let sheet = convert_row(result?, row_number)?;

        let key = (sheet.employee_code.clone(), sheet.period);
        if let Some(&first_row) = seen.get(&key) {
            return Err(LoadError::DuplicateSheet {
                employee_code: sheet.employee_code,
                period: sheet.period,
                row: row_number,
                first_row,
            });
        }
        seen.insert(key, row_number);
        sheets.push(sheet);
    }
    Ok(sheets)
}

pub fn load_from_str(input: &str) -> Result<Vec<SalarySheet>, LoadError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<SalarySheet>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,6,with_insurance,22000000,22,22000000
";

    const FULL_CSV: &str = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base,kpi_bonus,overtime_1_5,overtime_2,overtime_3,dependent_count,advance_payment
NV002,2025,6,with_insurance,30000000,20.5,25000000,2000000,450000,600000,900000,2,3000000
NV003,2025,6,seasonal,8000000,15,0,,,,,,
";

    #[test]
    fn minimal_csv_defaults_optional_amounts_to_zero() {
        let sheets = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(sheets.len(), 1);
        let sheet = &sheets[0];
        assert_eq!(sheet.employee_code, "NV001");
        assert_eq!(sheet.period, PayPeriod::new(2025, 6).unwrap());
        assert_eq!(sheet.input.gross_salary, dec!(22000000));
        assert_eq!(sheet.input.kpi_bonus, Decimal::ZERO);
        assert_eq!(sheet.input.overtime_3, Decimal::ZERO);
        assert_eq!(sheet.input.dependent_count, 0);
        assert_eq!(sheet.input.advance_payment, Decimal::ZERO);
        assert_eq!(sheet.input.salary_type, SalaryType::WithInsurance);
    }

    #[test]
    fn full_csv_populates_every_field() {
        let sheets = load_from_str(FULL_CSV).expect("should parse full CSV");

        assert_eq!(sheets.len(), 2);
        let input = &sheets[0].input;
        assert_eq!(input.working_days, dec!(20.5));
        assert_eq!(input.insurance_base, dec!(25000000));
        assert_eq!(input.kpi_bonus, dec!(2000000));
        assert_eq!(input.overtime_1_5, dec!(450000));
        assert_eq!(input.overtime_2, dec!(600000));
        assert_eq!(input.overtime_3, dec!(900000));
        assert_eq!(input.dependent_count, 2);
        assert_eq!(input.advance_payment, dec!(3000000));

        assert_eq!(sheets[1].input.salary_type, SalaryType::Seasonal);
        assert_eq!(sheets[1].input.kpi_bonus, Decimal::ZERO);
    }

    #[test]
    fn whitespace_around_values_is_tolerated() {
        let csv = "\
employee_code , year , month , salary_type , gross_salary , working_days , insurance_base
 NV004 , 2025 , 1 , seasonal , 5000000 , 10 , 0
";

        let sheets = load_from_str(csv).expect("should parse");

        assert_eq!(sheets[0].employee_code, "NV004");
        assert_eq!(sheets[0].input.salary_type, SalaryType::Seasonal);
    }

    #[test]
    fn unknown_salary_type_reports_row() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,6,with_insurance,22000000,22,22000000
NV002,2025,6,freelance,22000000,22,22000000
";

        let err = load_from_str(csv).unwrap_err();

        match err {
            LoadError::InvalidSalaryType { value, row } => {
                assert_eq!(value, "freelance");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_dependent_count_is_rejected() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base,dependent_count
NV001,2025,6,with_insurance,22000000,22,22000000,1.5
";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, LoadError::InvalidInput { row: 1, .. }));
    }

    #[test]
    fn invalid_month_is_rejected() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,13,with_insurance,22000000,22,22000000
";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, LoadError::InvalidInput { row: 1, .. }));
    }

    #[test]
    fn missing_required_column_is_a_parse_error() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days
NV001,2025,6,with_insurance,22000000,22
";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn non_numeric_amount_is_a_parse_error() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,6,with_insurance,lots,22,22000000
";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn same_employee_twice_in_a_period_is_rejected() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,6,with_insurance,22000000,22,22000000
NV002,2025,6,with_insurance,9000000,22,9000000
NV001,2025,6,with_insurance,5000000,22,5000000
";

        let err = load_from_str(csv).unwrap_err();

        match err {
            LoadError::DuplicateSheet {
                employee_code,
                period,
                row,
                first_row,
            } => {
                assert_eq!(employee_code, "NV001");
                assert_eq!(period, PayPeriod::new(2025, 6).unwrap());
                assert_eq!(row, 3);
                assert_eq!(first_row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_employee_in_different_periods_is_accepted() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,6,with_insurance,22000000,22,22000000
NV001,2025,7,with_insurance,22000000,22,22000000
";

        let sheets = load_from_str(csv).expect("different months are distinct sheets");

        assert_eq!(sheets.len(), 2);
    }

    #[test]
    fn non_finite_amount_is_a_parse_error() {
        let csv = "\
employee_code,year,month,salary_type,gross_salary,working_days,insurance_base
NV001,2025,6,with_insurance,NaN,22,inf
";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn empty_input_yields_no_sheets() {
        let sheets = load_from_str("").expect("empty input is valid");

        assert!(sheets.is_empty());
    }
}
