mod compensation;
mod kpi;
mod pay_period;
mod rating;
mod records;
mod salary_type;
mod statutory_rates;
pub(crate) mod tax_bracket;

pub use compensation::{
    CompensationInput, CompensationResult, EmployeeContributions, EmployerContributions,
};
pub use kpi::{
    AttitudeScores, KpiInput, KpiResult, KpiScores, ProductivityScores, ProgressScores,
    QualityScores, RecruitmentScores, RequirementScores, RevenueScores,
};
pub use pay_period::PayPeriod;
pub use rating::{Rating, TieredCriterion};
pub use records::{KpiRecord, PayslipRecord, SalarySheet};
pub use salary_type::SalaryType;
pub use statutory_rates::StatutoryRates;
pub use tax_bracket::{BRACKET_COUNT, PIT_BRACKETS, TaxBracket};
