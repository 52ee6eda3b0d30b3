//! KPI coefficient and monthly KPI bonus.
//!
//! Two tracks are computed side by side:
//!
//! - the **coefficient**, a sum of six rate-like category scores, which
//!   scales the basic salary;
//! - **flat bonuses** (mentoring, team management, large clients, code and lot
//!   targets, hires, recruitment cost recovery) added on top as money.
//!
//! The flat bonuses never feed back into the coefficient.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::common::{checked_mul, checked_sub, checked_sum, floor_at_zero};
use crate::error::InvalidInputError;
use crate::models::{
    AttitudeScores, KpiInput, KpiResult, ProductivityScores, ProgressScores, QualityScores,
    RecruitmentScores, RequirementScores, TieredCriterion,
};
use crate::validation::ensure_non_negative;

/// Largest difference between the recorded bonus and the computed KPI amount
/// that still counts as agreement.
pub const KPI_GAP_TOLERANCE: Decimal = dec!(1000);

const OVERDUE_TASK_PENALTY: Decimal = dec!(0.01);
const SCORE_CEILING: Decimal = dec!(100);
const RECRUITMENT_BUDGET: Decimal = dec!(2000000);
const RECRUITMENT_SAVINGS_UNIT: Decimal = dec!(10000);

const MENTORING_BONUS: Decimal = dec!(100000);
const TEAM_MANAGEMENT_BONUS: Decimal = dec!(2000000);
const LARGE_CLIENT_BONUS: Decimal = dec!(4000000);
const HIRE_BONUS: Decimal = dec!(500000);

/// Turns a [`KpiInput`] into a [`KpiResult`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::{KpiCoefficientCalculator, KpiInput, KpiScores};
///
/// let input = KpiInput {
///     employee_code: "NV001".to_string(),
///     basic_salary: dec!(10000000),
///     recorded_bonus: dec!(20000000),
///     scores: KpiScores::default(),
/// };
///
/// let result = KpiCoefficientCalculator.calculate(&input).unwrap();
///
/// // Clean quality and requirements, no recruitment spend.
/// assert_eq!(result.kpi_coefficient, dec!(400));
/// assert_eq!(result.total_monthly_kpi, dec!(40000000));
/// assert!(result.has_kpi_gap);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KpiCoefficientCalculator;

impl KpiCoefficientCalculator {
    /// Computes category scores, the coefficient, the monthly KPI amount and
    /// the gap flag.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Negative`] if any money amount or score
    /// is negative, and [`InvalidInputError::Overflow`] if the amounts are
    /// too large to combine.
    pub fn calculate(
        &self,
        input: &KpiInput,
    ) -> Result<KpiResult, InvalidInputError> {
        validate_input(input)?;
        let scores = &input.scores;

        let productivity = self.productivity(&scores.productivity);
        let quality = self.quality(&scores.quality);
        let attitude = self.attitude(&scores.attitude)?;
        let progress = self.progress(&scores.progress)?;
        let requirements = self.requirements(&scores.requirements);
        let recruitment = self.recruitment(&scores.recruitment);
        let revenue_bonus = LARGE_CLIENT_BONUS * Decimal::from(scores.revenue.clients_over_100m);

        let kpi_coefficient = checked_sum(
            "kpi_coefficient",
            [productivity, quality, attitude, progress, requirements, recruitment],
        )?;

        let salary_share =
            checked_mul("basic_salary", input.basic_salary, kpi_coefficient)? / dec!(100);
        let total_monthly_kpi = checked_sum(
            "total_monthly_kpi",
            [salary_share, self.flat_bonuses(input)?, revenue_bonus],
        )?;

        let gap = checked_sub("recorded_bonus", input.recorded_bonus, total_monthly_kpi)?;
        let has_kpi_gap = gap.abs() > KPI_GAP_TOLERANCE;

        debug!(
            employee = %input.employee_code,
            %kpi_coefficient,
            %total_monthly_kpi,
            "computed KPI"
        );
        if has_kpi_gap {
            warn!(
                employee = %input.employee_code,
                recorded = %input.recorded_bonus,
                computed = %total_monthly_kpi,
                "recorded bonus disagrees with computed KPI"
            );
        }

        Ok(KpiResult {
            employee_code: input.employee_code.clone(),
            productivity,
            quality,
            attitude,
            progress,
            requirements,
            recruitment,
            revenue_bonus,
            kpi_coefficient,
            total_monthly_kpi,
            has_kpi_gap,
        })
    }

    fn productivity(
        &self,
        scores: &ProductivityScores,
    ) -> Decimal {
        TieredCriterion::CompletedOnTime.delta(scores.completed_on_time)
            - Decimal::from(scores.overdue_task_count) * OVERDUE_TASK_PENALTY
            + TieredCriterion::TaskTarget.delta(scores.task_target)
            + TieredCriterion::EffortRatio.delta(scores.effort_ratio)
            + TieredCriterion::GitActivity.delta(scores.git_activity)
    }

    fn quality(
        &self,
        scores: &QualityScores,
    ) -> Decimal {
        floor_at_zero(
            SCORE_CEILING
                - Decimal::from(scores.prod_bugs) * dec!(5)
                - Decimal::from(scores.test_bugs) * dec!(2),
        )
    }

    fn attitude(
        &self,
        scores: &AttitudeScores,
    ) -> Result<Decimal, InvalidInputError> {
        checked_sum(
            "attitude",
            [
                scores.positive_attitude,
                scores.tech_contribution,
                Decimal::from(scores.tech_sharing) * dec!(5),
                Decimal::from(scores.tech_articles) * dec!(3),
                Decimal::from(scores.mentoring) * dec!(2),
                Decimal::from(scores.team_management) * dec!(3),
            ],
        )
    }

    /// Not floored: frequent plan changes can push this below zero.
    fn progress(
        &self,
        scores: &ProgressScores,
    ) -> Result<Decimal, InvalidInputError> {
        let earned = checked_sum(
            "progress",
            [scores.on_time_completion, scores.story_point_accuracy],
        )?;
        Ok(earned - Decimal::from(scores.plan_changes) * dec!(2))
    }

    fn requirements(
        &self,
        scores: &RequirementScores,
    ) -> Decimal {
        floor_at_zero(
            SCORE_CEILING
                - Decimal::from(scores.change_requests) * dec!(5)
                - Decimal::from(scores.misunderstanding_errors) * dec!(10),
        )
    }

    fn recruitment(
        &self,
        scores: &RecruitmentScores,
    ) -> Decimal {
        Decimal::from(scores.cv_count) * dec!(0.5)
            + Decimal::from(scores.passed_candidates) * dec!(2)
            + floor_at_zero((RECRUITMENT_BUDGET - scores.recruitment_cost) / RECRUITMENT_SAVINGS_UNIT)
    }

    /// Money paid on top of the coefficient share, excluding the large-client
    /// bonus which is reported separately.
    fn flat_bonuses(
        &self,
        input: &KpiInput,
    ) -> Result<Decimal, InvalidInputError> {
        let scores = &input.scores;
        checked_sum(
            "flat_bonuses",
            [
                MENTORING_BONUS * Decimal::from(scores.attitude.mentoring),
                TEAM_MANAGEMENT_BONUS * Decimal::from(scores.attitude.team_management),
                scores.productivity.loc_target,
                scores.productivity.lot_target,
                HIRE_BONUS * Decimal::from(scores.recruitment.passed_candidates),
                floor_at_zero(scores.recruitment.recruitment_cost - RECRUITMENT_BUDGET),
            ],
        )
    }
}

/// Evaluates KPI with the fixed scoring rules.
///
/// # Errors
///
/// See [`KpiCoefficientCalculator::calculate`].
pub fn compute_kpi(input: &KpiInput) -> Result<KpiResult, InvalidInputError> {
    KpiCoefficientCalculator.calculate(input)
}

fn validate_input(input: &KpiInput) -> Result<(), InvalidInputError> {
    let scores = &input.scores;
    ensure_non_negative("basic_salary", input.basic_salary)?;
    ensure_non_negative("recorded_bonus", input.recorded_bonus)?;
    ensure_non_negative("loc_target", scores.productivity.loc_target)?;
    ensure_non_negative("lot_target", scores.productivity.lot_target)?;
    ensure_non_negative("positive_attitude", scores.attitude.positive_attitude)?;
    ensure_non_negative("tech_contribution", scores.attitude.tech_contribution)?;
    ensure_non_negative("on_time_completion", scores.progress.on_time_completion)?;
    ensure_non_negative("story_point_accuracy", scores.progress.story_point_accuracy)?;
    ensure_non_negative("recruitment_cost", scores.recruitment.recruitment_cost)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{KpiScores, Rating, RevenueScores};

    fn sample_scores() -> KpiScores {
        KpiScores {
            productivity: ProductivityScores {
                completed_on_time: Rating::Exceeded,
                overdue_task_count: 3,
                task_target: Rating::Met,
                effort_ratio: Rating::NotMet,
                git_activity: Rating::NotApplicable,
                loc_target: dec!(500000),
                lot_target: dec!(300000),
            },
            quality: QualityScores {
                prod_bugs: 2,
                test_bugs: 5,
            },
            attitude: AttitudeScores {
                positive_attitude: dec!(5),
                tech_contribution: dec!(3),
                tech_sharing: 1,
                tech_articles: 2,
                mentoring: 1,
                team_management: 0,
            },
            progress: ProgressScores {
                on_time_completion: dec!(8),
                story_point_accuracy: dec!(7),
                plan_changes: 1,
            },
            requirements: RequirementScores {
                change_requests: 2,
                misunderstanding_errors: 1,
            },
            recruitment: RecruitmentScores {
                cv_count: 4,
                passed_candidates: 1,
                recruitment_cost: dec!(1500000),
            },
            revenue: RevenueScores {
                clients_over_100m: 1,
            },
        }
    }

    fn sample_input() -> KpiInput {
        KpiInput {
            employee_code: "NV042".to_string(),
            basic_salary: dec!(20000000),
            recorded_bonus: dec!(55044000),
            scores: sample_scores(),
        }
    }

    // =========================================================================
    // end-to-end tests
    // =========================================================================

    #[test]
    fn calculate_sample_employee() {
        let result = compute_kpi(&sample_input()).unwrap();

        assert_eq!(result.employee_code, "NV042");
        assert_eq!(result.productivity, dec!(0.22));
        assert_eq!(result.quality, dec!(80));
        assert_eq!(result.attitude, dec!(21));
        assert_eq!(result.progress, dec!(13));
        assert_eq!(result.requirements, dec!(80));
        assert_eq!(result.recruitment, dec!(54));
        assert_eq!(result.revenue_bonus, dec!(4000000));
        assert_eq!(result.kpi_coefficient, dec!(248.22));
        assert_eq!(result.total_monthly_kpi, dec!(55044000));
        assert!(!result.has_kpi_gap);
    }

    #[test]
    fn calculate_is_deterministic() {
        let input = sample_input();

        let first = compute_kpi(&input).unwrap();
        let second = compute_kpi(&input).unwrap();

        assert_eq!(first, second);
    }

    // =========================================================================
    // category tests
    // =========================================================================

    #[test]
    fn productivity_combines_deltas_and_overdue_penalty() {
        let scores = ProductivityScores {
            completed_on_time: Rating::NotMet,
            overdue_task_count: 10,
            task_target: Rating::Exceeded,
            effort_ratio: Rating::Exceeded,
            git_activity: Rating::NotMet,
            ..ProductivityScores::default()
        };

        let result = KpiCoefficientCalculator.productivity(&scores);

        // -0.25 - 0.10 + 1 + 0.25 - 0.1
        assert_eq!(result, dec!(0.8));
    }

    #[test]
    fn productivity_ignores_monetary_targets() {
        let scores = ProductivityScores {
            loc_target: dec!(9000000),
            lot_target: dec!(1000000),
            ..ProductivityScores::default()
        };

        let result = KpiCoefficientCalculator.productivity(&scores);

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn quality_is_floored_at_zero() {
        let scores = QualityScores {
            prod_bugs: 30,
            test_bugs: 40,
        };

        let result = KpiCoefficientCalculator.quality(&scores);

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn quality_deducts_per_bug() {
        let scores = QualityScores {
            prod_bugs: 1,
            test_bugs: 1,
        };

        let result = KpiCoefficientCalculator.quality(&scores);

        assert_eq!(result, dec!(93));
    }

    #[test]
    fn requirements_is_floored_at_zero() {
        let scores = RequirementScores {
            change_requests: 15,
            misunderstanding_errors: 8,
        };

        let result = KpiCoefficientCalculator.requirements(&scores);

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn progress_can_go_negative() {
        let scores = ProgressScores {
            on_time_completion: dec!(1),
            story_point_accuracy: dec!(1),
            plan_changes: 3,
        };

        let result = KpiCoefficientCalculator.progress(&scores).unwrap();

        assert_eq!(result, dec!(-4));
    }

    #[test]
    fn recruitment_savings_term_never_subtracts() {
        let scores = RecruitmentScores {
            cv_count: 2,
            passed_candidates: 0,
            recruitment_cost: dec!(5000000),
        };

        let result = KpiCoefficientCalculator.recruitment(&scores);

        assert_eq!(result, dec!(1));
    }

    #[test]
    fn recruitment_rewards_unspent_budget() {
        let scores = RecruitmentScores {
            recruitment_cost: dec!(0),
            ..RecruitmentScores::default()
        };

        let result = KpiCoefficientCalculator.recruitment(&scores);

        assert_eq!(result, dec!(200));
    }

    // =========================================================================
    // monthly KPI tests
    // =========================================================================

    #[test]
    fn recruitment_overspend_is_recovered_as_money() {
        let mut input = sample_input();
        input.scores.recruitment.recruitment_cost = dec!(3000000);

        let result = compute_kpi(&input).unwrap();

        assert_eq!(result.recruitment, dec!(4));
        // coefficient drops by 50, so the share drops by 10M; 1M overspend is added back
        assert_eq!(result.kpi_coefficient, dec!(198.22));
        assert_eq!(result.total_monthly_kpi, dec!(46044000));
    }

    #[test]
    fn team_management_pays_flat_stipend() {
        let mut input = sample_input();
        input.basic_salary = dec!(0);
        input.scores.attitude.team_management = 2;

        let result = compute_kpi(&input).unwrap();

        // 100k mentoring + 4M stipend + 4M client + 800k targets + 500k hire
        assert_eq!(result.total_monthly_kpi, dec!(9400000));
    }

    #[test]
    fn flat_bonuses_do_not_change_coefficient() {
        let mut input = sample_input();
        input.scores.revenue.clients_over_100m = 5;
        input.scores.productivity.loc_target = dec!(7000000);

        let result = compute_kpi(&input).unwrap();

        assert_eq!(result.kpi_coefficient, dec!(248.22));
        assert_eq!(result.revenue_bonus, dec!(20000000));
    }

    // =========================================================================
    // gap tests
    // =========================================================================

    #[test]
    fn gap_within_tolerance_is_not_flagged() {
        for recorded in [dec!(55045000), dec!(55043000), dec!(55044000.5)] {
            let input = KpiInput {
                recorded_bonus: recorded,
                ..sample_input()
            };

            let result = compute_kpi(&input).unwrap();

            assert!(!result.has_kpi_gap, "recorded {recorded} flagged");
        }
    }

    #[test]
    fn gap_beyond_tolerance_is_flagged() {
        for recorded in [dec!(55045001), dec!(55042999)] {
            let input = KpiInput {
                recorded_bonus: recorded,
                ..sample_input()
            };

            let result = compute_kpi(&input).unwrap();

            assert!(result.has_kpi_gap, "recorded {recorded} not flagged");
        }
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn negative_basic_salary_is_rejected() {
        let input = KpiInput {
            basic_salary: dec!(-100),
            ..sample_input()
        };

        let result = compute_kpi(&input);

        assert_eq!(
            result,
            Err(InvalidInputError::Negative {
                field: "basic_salary",
                value: dec!(-100),
            })
        );
    }

    #[test]
    fn negative_recruitment_cost_is_rejected() {
        let mut input = sample_input();
        input.scores.recruitment.recruitment_cost = dec!(-1);

        let result = compute_kpi(&input);

        assert!(matches!(
            result,
            Err(InvalidInputError::Negative {
                field: "recruitment_cost",
                ..
            })
        ));
    }

    #[test]
    fn huge_basic_salary_reports_overflow() {
        let mut input = sample_input();
        input.basic_salary = Decimal::MAX / dec!(2);

        let result = compute_kpi(&input);

        assert_eq!(
            result,
            Err(InvalidInputError::Overflow {
                field: "basic_salary"
            })
        );
    }

    #[test]
    fn huge_targets_report_overflow() {
        let mut input = sample_input();
        input.scores.productivity.loc_target = Decimal::MAX;
        input.scores.productivity.lot_target = Decimal::MAX;

        let result = compute_kpi(&input);

        assert_eq!(
            result,
            Err(InvalidInputError::Overflow {
                field: "flat_bonuses"
            })
        );
    }

    #[test]
    fn huge_attitude_scores_report_overflow() {
        let mut input = sample_input();
        input.scores.attitude.positive_attitude = Decimal::MAX;
        input.scores.attitude.tech_contribution = Decimal::MAX;

        let result = compute_kpi(&input);

        assert_eq!(
            result,
            Err(InvalidInputError::Overflow { field: "attitude" })
        );
    }

    #[test]
    fn rounded_result_keeps_two_decimals_for_scores() {
        let mut input = sample_input();
        input.scores.attitude.positive_attitude = dec!(4.3333);

        let result = compute_kpi(&input).unwrap().rounded();

        assert_eq!(result.attitude, dec!(20.33));
    }
}
