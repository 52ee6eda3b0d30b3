use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Qualitative outcome picked for a tiered KPI criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rating {
    #[default]
    #[serde(rename = "Đạt")]
    Met,
    #[serde(rename = "Không Đạt")]
    NotMet,
    #[serde(rename = "Vượt Trội")]
    Exceeded,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Rating {
    /// Label shown on score sheets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Met => "Đạt",
            Self::NotMet => "Không Đạt",
            Self::Exceeded => "Vượt Trội",
            Self::NotApplicable => "N/A",
        }
    }

    /// Parses a sheet label. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Đạt" => Some(Self::Met),
            "Không Đạt" => Some(Self::NotMet),
            "Vượt Trội" => Some(Self::Exceeded),
            "N/A" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

/// Productivity criteria scored with a [`Rating`] instead of a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TieredCriterion {
    CompletedOnTime,
    TaskTarget,
    EffortRatio,
    GitActivity,
}

impl TieredCriterion {
    pub const ALL: [TieredCriterion; 4] = [
        Self::CompletedOnTime,
        Self::TaskTarget,
        Self::EffortRatio,
        Self::GitActivity,
    ];

    /// Coefficient delta for `rating` on this criterion.
    ///
    /// `N/A` contributes nothing, the same as meeting the target.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use payroll_core::{Rating, TieredCriterion};
    ///
    /// assert_eq!(TieredCriterion::CompletedOnTime.delta(Rating::NotMet), dec!(-0.25));
    /// assert_eq!(TieredCriterion::CompletedOnTime.delta(Rating::Exceeded), dec!(0.5));
    /// ```
    pub fn delta(
        &self,
        rating: Rating,
    ) -> Decimal {
        // (not met, exceeded); met and N/A are always zero
        let (not_met, exceeded) = match self {
            Self::CompletedOnTime => (dec!(-0.25), dec!(0.5)),
            Self::TaskTarget => (dec!(-0.5), dec!(1)),
            Self::EffortRatio => (dec!(-0.25), dec!(0.25)),
            Self::GitActivity => (dec!(-0.1), dec!(0.2)),
        };
        match rating {
            Rating::Met | Rating::NotApplicable => Decimal::ZERO,
            Rating::NotMet => not_met,
            Rating::Exceeded => exceeded,
        }
    }
}
