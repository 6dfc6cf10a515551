// ============================================================================
// Savings Domain Model
// Installment savings: a fixed deposit every month for a number of months
// ============================================================================

use crate::error::{CalcError, CalcResult};
use crate::numeric::{monthly_rate, Money, Rate};
use std::fmt;
use std::str::FromStr;

use super::{ensure_non_negative, ensure_period_count};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How interest accrues on the deposits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InterestMethod {
    /// Interest on each deposit only, never on earned interest
    Simple,
    /// Interest credited monthly and earning interest afterwards
    Compound,
}

impl InterestMethod {
    pub fn name(&self) -> &'static str {
        match self {
            InterestMethod::Simple => "simple",
            InterestMethod::Compound => "compound",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InterestMethod::Simple => "단리",
            InterestMethod::Compound => "복리",
        }
    }
}

impl fmt::Display for InterestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterestMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(InterestMethod::Simple),
            "compound" => Ok(InterestMethod::Compound),
            other => Err(CalcError::invalid_input(
                "method",
                format!("unknown interest method `{other}`"),
            )),
        }
    }
}

/// When in each period the deposit lands.
///
/// A start-of-period deposit earns interest for the period it is made in,
/// so deposit `k` of `n` is held `n − k + 1` periods. An end-of-period
/// deposit is held `n − k` periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DepositTiming {
    #[default]
    StartOfPeriod,
    EndOfPeriod,
}

impl DepositTiming {
    /// Periods deposit `period` (1-based) earns interest out of `total`
    pub(crate) fn periods_held(self, period: u32, total: u32) -> u32 {
        match self {
            DepositTiming::StartOfPeriod => total - period + 1,
            DepositTiming::EndOfPeriod => total - period,
        }
    }
}

impl FromStr for DepositTiming {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "start" | "start_of_period" => Ok(DepositTiming::StartOfPeriod),
            "end" | "end_of_period" => Ok(DepositTiming::EndOfPeriod),
            other => Err(CalcError::invalid_input(
                "timing",
                format!("unknown deposit timing `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SavingsInput {
    pub periodic_deposit: Money,
    pub num_periods: u32,
    pub annual_rate_percent: Rate,
    pub method: InterestMethod,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: DepositTiming,
}

impl SavingsInput {
    /// Create a validated input with start-of-period deposits.
    pub fn new(
        periodic_deposit: Money,
        num_periods: u32,
        annual_rate_percent: Rate,
        method: InterestMethod,
    ) -> CalcResult<Self> {
        let input = Self {
            periodic_deposit,
            num_periods,
            annual_rate_percent,
            method,
            timing: DepositTiming::default(),
        };
        input.validate()?;
        Ok(input)
    }

    /// Builder method: set deposit timing
    pub fn with_timing(mut self, timing: DepositTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("periodic_deposit", self.periodic_deposit)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        ensure_period_count("num_periods", self.num_periods)
    }

    pub fn monthly_rate(&self) -> CalcResult<Rate> {
        Ok(monthly_rate(self.annual_rate_percent)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SavingsRow {
    pub period: u32,
    pub deposit: Money,
    /// Simple: lifetime interest earned by this period's deposit.
    /// Compound: interest accumulated in the account so far.
    pub interest_accrued: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SavingsResult {
    pub method: InterestMethod,
    pub total_deposited: Money,
    /// final_balance − total_deposited
    pub total_interest: Money,
    pub final_balance: Money,
    pub schedule: Vec<SavingsRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_PERIODS;
    use rust_decimal_macros::dec;

    #[test]
    fn test_savings_input_validation() {
        assert!(SavingsInput::new(dec!(100_000), 12, dec!(3), InterestMethod::Simple).is_ok());
        assert!(SavingsInput::new(dec!(100_000), 0, dec!(3), InterestMethod::Simple).is_err());
        assert!(SavingsInput::new(dec!(-5), 12, dec!(3), InterestMethod::Compound).is_err());
    }

    #[test]
    fn test_period_count_is_capped() {
        let method = InterestMethod::Compound;
        assert!(SavingsInput::new(dec!(1), MAX_PERIODS, dec!(3), method).is_ok());
        assert!(SavingsInput::new(dec!(1), MAX_PERIODS + 1, dec!(3), method).is_err());
        assert!(SavingsInput::new(dec!(1), u32::MAX, dec!(3), method).is_err());
    }

    #[test]
    fn test_default_timing() {
        let input = SavingsInput::new(dec!(1), 1, dec!(1), InterestMethod::Simple).unwrap();
        assert_eq!(input.timing, DepositTiming::StartOfPeriod);
        let input = input.with_timing(DepositTiming::EndOfPeriod);
        assert_eq!(input.timing, DepositTiming::EndOfPeriod);
    }

    #[test]
    fn test_periods_held() {
        assert_eq!(DepositTiming::StartOfPeriod.periods_held(1, 12), 12);
        assert_eq!(DepositTiming::StartOfPeriod.periods_held(12, 12), 1);
        assert_eq!(DepositTiming::EndOfPeriod.periods_held(12, 12), 0);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("Compound".parse::<InterestMethod>().unwrap(), InterestMethod::Compound);
        assert!("daily".parse::<InterestMethod>().is_err());
        assert_eq!("end-of-period".parse::<DepositTiming>().unwrap(), DepositTiming::EndOfPeriod);
        assert!("middle".parse::<DepositTiming>().is_err());
    }
}
