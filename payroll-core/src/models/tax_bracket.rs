use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Number of slices in the personal income tax schedule.
pub const BRACKET_COUNT: usize = 7;

/// One slice of the progressive personal income tax schedule.
///
/// `ceiling` is cumulative: the bracket covers taxable income between the
/// previous bracket's ceiling and this one. The top bracket has no ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub ceiling: Option<Decimal>,
    pub rate: Decimal,
}

/// Monthly personal income tax schedule, ceilings strictly increasing.
pub const PIT_BRACKETS: [TaxBracket; BRACKET_COUNT] = [
    TaxBracket { ceiling: Some(dec!(5000000)), rate: dec!(0.05) },
    TaxBracket { ceiling: Some(dec!(10000000)), rate: dec!(0.10) },
    TaxBracket { ceiling: Some(dec!(18000000)), rate: dec!(0.15) },
    TaxBracket { ceiling: Some(dec!(32000000)), rate: dec!(0.20) },
    TaxBracket { ceiling: Some(dec!(52000000)), rate: dec!(0.25) },
    TaxBracket { ceiling: Some(dec!(80000000)), rate: dec!(0.30) },
    TaxBracket { ceiling: None, rate: dec!(0.35) },
];
