use serde::{Deserialize, Serialize};

/// Selects which withholding policy applies to a payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryType {
    /// Statutory insurance on both sides plus the progressive tax table.
    WithInsurance,
    /// No insurance; flat withholding on total income.
    Seasonal,
}

impl SalaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithInsurance => "with_insurance",
            Self::Seasonal => "seasonal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "with_insurance" => Some(Self::WithInsurance),
            "seasonal" => Some(Self::Seasonal),
            _ => None,
        }
    }

    /// Whether statutory insurance lines are computed for this salary type.
    pub fn is_insured(&self) -> bool {
        matches!(self, Self::WithInsurance)
    }
}
