//! CSV loader for monthly KPI score sheets.
//!
//! Only `employee_code`, `year` and `month` are required. Any other column
//! may be left out or left empty: numeric scores then default to `0` and
//! rating columns to `N/A`.
//!
//! Rating columns (`completed_on_time`, `task_target`, `effort_ratio`,
//! `git_activity`) take one of `Đạt`, `Không Đạt`, `Vượt Trội`, `N/A`.
//!
//! Count columns (`overdue_task_count`, `prod_bugs`, `test_bugs`,
//! `tech_sharing`, `tech_articles`, `mentoring`, `team_management`,
//! `plan_changes`, `change_requests`, `misunderstanding_errors`, `cv_count`,
//! `passed_candidates`, `clients_over_100m`) must be whole numbers.
//!
//! Decimal columns: `loc_target`, `lot_target`, `positive_attitude`,
//! `tech_contribution`, `on_time_completion`, `story_point_accuracy`,
//! `recruitment_cost`.
//!
//! ```csv
//! employee_code,year,month,completed_on_time,prod_bugs,recruitment_cost
//! NV001,2025,6,Vượt Trội,2,1500000
//! ```

use std::io::Read;
use std::path::Path;

use payroll_core::validation::count;
use payroll_core::{
    AttitudeScores, InvalidInputError, KpiScores, PayPeriod, ProductivityScores, ProgressScores,
    QualityScores, Rating, RecruitmentScores, RequirementScores, RevenueScores,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::LoadError;

/// KPI scores for one employee and month, as read from a score sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiSubmission {
    pub employee_code: String,
    pub period: PayPeriod,
    pub scores: KpiScores,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    employee_code: String,
    year: i32,
    month: u32,

    completed_on_time: Option<String>,
    overdue_task_count: Option<Decimal>,
    task_target: Option<String>,
    effort_ratio: Option<String>,
    git_activity: Option<String>,
    loc_target: Option<Decimal>,
    lot_target: Option<Decimal>,

    prod_bugs: Option<Decimal>,
    test_bugs: Option<Decimal>,

    positive_attitude: Option<Decimal>,
    tech_contribution: Option<Decimal>,
    tech_sharing: Option<Decimal>,
    tech_articles: Option<Decimal>,
    mentoring: Option<Decimal>,
    team_management: Option<Decimal>,

    on_time_completion: Option<Decimal>,
    story_point_accuracy: Option<Decimal>,
    plan_changes: Option<Decimal>,

    change_requests: Option<Decimal>,
    misunderstanding_errors: Option<Decimal>,

    cv_count: Option<Decimal>,
    passed_candidates: Option<Decimal>,
    recruitment_cost: Option<Decimal>,

    clients_over_100m: Option<Decimal>,
}

fn rating(
    field: &'static str,
    value: Option<String>,
    row: usize,
) -> Result<Rating, LoadError> {
    match value {
        None => Ok(Rating::NotApplicable),
        Some(label) if label.trim().is_empty() => Ok(Rating::NotApplicable),
        Some(label) => Rating::parse(&label).ok_or(LoadError::InvalidRating {
            field,
            value: label,
            row,
        }),
    }
}

fn count_or_zero(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<u32, InvalidInputError> {
    count(field, value.unwrap_or_default())
}

fn convert_row(
    row: ScoreRow,
    row_number: usize,
) -> Result<KpiSubmission, LoadError> {
    let period = PayPeriod::new(row.year, row.month).map_err(LoadError::at_row(row_number))?;

    let productivity = ProductivityScores {
        completed_on_time: rating("completed_on_time", row.completed_on_time, row_number)?,
        overdue_task_count: count_or_zero("overdue_task_count", row.overdue_task_count)
            .map_err(LoadError::at_row(row_number))?,
        task_target: rating("task_target", row.task_target, row_number)?,
        effort_ratio: rating("effort_ratio", row.effort_ratio, row_number)?,
        git_activity: rating("git_activity", row.git_activity, row_number)?,
        loc_target: row.loc_target.unwrap_or_default(),
        lot_target: row.lot_target.unwrap_or_default(),
    };

    let counts = |field: &'static str, value: Option<Decimal>| {
        count_or_zero(field, value).map_err(LoadError::at_row(row_number))
    };

    let scores = KpiScores {
        productivity,
        quality: QualityScores {
            prod_bugs: counts("prod_bugs", row.prod_bugs)?,
            test_bugs: counts("test_bugs", row.test_bugs)?,
        },
        attitude: AttitudeScores {
            positive_attitude: row.positive_attitude.unwrap_or_default(),
            tech_contribution: row.tech_contribution.unwrap_or_default(),
            tech_sharing: counts("tech_sharing", row.tech_sharing)?,
            tech_articles: counts("tech_articles", row.tech_articles)?,
            mentoring: counts("mentoring", row.mentoring)?,
            team_management: counts("team_management", row.team_management)?,
        },
        progress: ProgressScores {
            on_time_completion: row.on_time_completion.unwrap_or_default(),
            story_point_accuracy: row.story_point_accuracy.unwrap_or_default(),
            plan_changes: counts("plan_changes", row.plan_changes)?,
        },
        requirements: RequirementScores {
            change_requests: counts("change_requests", row.change_requests)?,
            misunderstanding_errors: counts("misunderstanding_errors", row.misunderstanding_errors)?,
        },
        recruitment: RecruitmentScores {
            cv_count: counts("cv_count", row.cv_count)?,
            passed_candidates: counts("passed_candidates", row.passed_candidates)?,
            recruitment_cost: row.recruitment_cost.unwrap_or_default(),
        },
        revenue: RevenueScores {
            clients_over_100m: counts("clients_over_100m", row.clients_over_100m)?,
        },
    };

    Ok(KpiSubmission {
        employee_code: row.employee_code,
        period,
        scores,
    })
}

/// Parses KPI score sheets from any reader. Rows are returned in file order.
///
/// # Errors
///
/// * [`LoadError::Csv`] if the CSV is malformed.
/// * [`LoadError::InvalidRating`] for an unknown rating label.
/// * [`LoadError::InvalidInput`] for a bad period or a negative or
///   fractional count.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<KpiSubmission>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<ScoreRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

pub fn load_from_str(input: &str) -> Result<Vec<KpiSubmission>, LoadError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<KpiSubmission>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}
