use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{round_to_hundredths, round_to_unit};
use crate::models::Rating;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductivityScores {
    pub completed_on_time: Rating,
    pub overdue_task_count: u32,
    pub task_target: Rating,
    pub effort_ratio: Rating,
    pub git_activity: Rating,
    /// Monetary line-of-code target bonus, paid as-is.
    pub loc_target: Decimal,
    /// Monetary lot target bonus, paid as-is.
    pub lot_target: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScores {
    pub prod_bugs: u32,
    pub test_bugs: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttitudeScores {
    pub positive_attitude: Decimal,
    pub tech_contribution: Decimal,
    pub tech_sharing: u32,
    pub tech_articles: u32,
    /// Number of people mentored.
    pub mentoring: u32,
    /// Number of teams managed.
    pub team_management: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressScores {
    pub on_time_completion: Decimal,
    pub story_point_accuracy: Decimal,
    pub plan_changes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementScores {
    pub change_requests: u32,
    pub misunderstanding_errors: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentScores {
    pub cv_count: u32,
    pub passed_candidates: u32,
    pub recruitment_cost: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueScores {
    /// Clients billed more than 100 million this month.
    pub clients_over_100m: u32,
}

/// Per-category performance scores for one employee and month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiScores {
    pub productivity: ProductivityScores,
    pub quality: QualityScores,
    pub attitude: AttitudeScores,
    pub progress: ProgressScores,
    pub requirements: RequirementScores,
    pub recruitment: RecruitmentScores,
    pub revenue: RevenueScores,
}

/// Inputs for a KPI evaluation.
///
/// `basic_salary` and `recorded_bonus` come from payroll; the calculator
/// never derives them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiInput {
    pub employee_code: String,
    pub basic_salary: Decimal,
    /// Bonus already recorded on the payroll, compared against the computed
    /// KPI amount.
    pub recorded_bonus: Decimal,
    pub scores: KpiScores,
}

/// KPI verdict for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiResult {
    pub employee_code: String,
    pub productivity: Decimal,
    pub quality: Decimal,
    pub attitude: Decimal,
    pub progress: Decimal,
    pub requirements: Decimal,
    pub recruitment: Decimal,
    /// Flat bonus for large clients. Not part of the coefficient.
    pub revenue_bonus: Decimal,
    /// Sum of the six scored categories.
    pub kpi_coefficient: Decimal,
    pub total_monthly_kpi: Decimal,
    /// Recorded bonus and computed KPI amount disagree beyond tolerance.
    pub has_kpi_gap: bool,
}

impl KpiResult {
    /// Scores to two decimals, money to whole units.
    pub fn rounded(&self) -> Self {
        Self {
            employee_code: self.employee_code.clone(),
            productivity: round_to_hundredths(self.productivity),
            quality: round_to_hundredths(self.quality),
            attitude: round_to_hundredths(self.attitude),
            progress: round_to_hundredths(self.progress),
            requirements: round_to_hundredths(self.requirements),
            recruitment: round_to_hundredths(self.recruitment),
            revenue_bonus: round_to_unit(self.revenue_bonus),
            kpi_coefficient: round_to_hundredths(self.kpi_coefficient),
            total_monthly_kpi: round_to_unit(self.total_monthly_kpi),
            has_kpi_gap: self.has_kpi_gap,
        }
    }
}
