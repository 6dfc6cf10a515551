// ============================================================================
// Loan Domain Model
// ============================================================================

use crate::error::{CalcError, CalcResult};
use crate::numeric::{checked_sum, monthly_rate, Money, Rate};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::{ensure_non_negative, ensure_period_count};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Repayment Method
// ============================================================================

/// How a loan is paid down over its term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RepaymentMethod {
    /// Annuity: constant total payment, principal share grows over time
    EqualPayment,
    /// Constant principal portion, total payment declines over time
    EqualPrincipal,
    /// Interest only until maturity, full principal in the last period
    Bullet,
}

impl RepaymentMethod {
    pub const ALL: [RepaymentMethod; 3] = [
        RepaymentMethod::EqualPayment,
        RepaymentMethod::EqualPrincipal,
        RepaymentMethod::Bullet,
    ];

    /// Machine name used in forms and logs
    pub fn name(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPayment => "equal_payment",
            RepaymentMethod::EqualPrincipal => "equal_principal",
            RepaymentMethod::Bullet => "bullet",
        }
    }

    /// Korean display label
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualPayment => "원리금균등상환",
            RepaymentMethod::EqualPrincipal => "원금균등상환",
            RepaymentMethod::Bullet => "만기일시상환",
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RepaymentMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        RepaymentMethod::ALL
            .into_iter()
            .find(|m| m.name() == normalized)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "method",
                    format!("unknown repayment method `{}`", s.trim()),
                )
            })
    }
}

// ============================================================================
// Input
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: Money,

    /// Nominal annual rate in percent (5.5 = 5.5%)
    pub annual_rate_percent: Rate,

    /// Number of monthly periods, at least one
    pub term_months: u32,
}

impl LoanInput {
    /// Create a validated loan input.
    ///
    /// # Errors
    /// `InvalidInput` for a negative principal or rate, or a zero term.
    pub fn new(principal: Money, annual_rate_percent: Rate, term_months: u32) -> CalcResult<Self> {
        let input = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("principal", self.principal)?;
        ensure_non_negative("annual_rate_percent", self.annual_rate_percent)?;
        ensure_period_count("term_months", self.term_months)
    }

    /// Periodic (monthly) rate as a fraction
    pub fn monthly_rate(&self) -> CalcResult<Rate> {
        Ok(monthly_rate(self.annual_rate_percent)?)
    }
}

// ============================================================================
// Output
// ============================================================================

/// One period of a repayment schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmortizationRow {
    /// 1-based period index
    pub period: u32,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// principal_portion + interest_portion
    pub payment: Money,
    /// Balance still owed after this period's payment
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanResult {
    pub method: RepaymentMethod,

    /// Headline payment: the constant annuity for equal payment, the first
    /// period's payment for equal principal, the monthly interest for bullet
    pub periodic_payment: Money,

    /// Sum of all scheduled payments
    pub total_payment: Money,

    /// Sum of all interest portions (total_payment − principal)
    pub total_interest: Money,

    /// Rounding residual folded into the final period's principal so the
    /// balance closes at exactly zero. Zero when no correction was needed.
    pub final_adjustment: Money,

    /// One row per period, `term_months` long
    pub schedule: Vec<AmortizationRow>,
}

impl LoanResult {
    /// Assemble a result from a finished schedule, deriving the totals.
    pub(crate) fn from_schedule(
        method: RepaymentMethod,
        periodic_payment: Money,
        final_adjustment: Money,
        schedule: Vec<AmortizationRow>,
    ) -> CalcResult<Self> {
        let total_payment = checked_sum(schedule.iter().map(|r| r.payment))?;
        let total_interest = checked_sum(schedule.iter().map(|r| r.interest_portion))?;
        Ok(Self {
            method,
            periodic_payment,
            total_payment,
            total_interest,
            final_adjustment,
            schedule,
        })
    }

    /// Sum of principal portions; equals the borrowed principal.
    pub fn principal_repaid(&self) -> Money {
        self.schedule
            .iter()
            .fold(Decimal::ZERO, |acc, row| acc + row.principal_portion)
    }

    pub fn final_row(&self) -> Option<&AmortizationRow> {
        self.schedule.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_PERIODS;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_input_validation() {
        assert!(LoanInput::new(dec!(1_000_000), dec!(4.5), 12).is_ok());
        assert!(LoanInput::new(dec!(-1), dec!(4.5), 12).is_err());
        assert!(LoanInput::new(dec!(1_000_000), dec!(-0.1), 12).is_err());

        let err = LoanInput::new(dec!(1_000_000), dec!(4.5), 0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "term_months"));
    }

    #[test]
    fn test_term_is_capped() {
        assert!(LoanInput::new(dec!(1), dec!(0), MAX_PERIODS).is_ok());
        assert!(LoanInput::new(dec!(1), dec!(0), MAX_PERIODS + 1).is_err());

        let err = LoanInput::new(dec!(1), dec!(0), u32::MAX).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "term_months"));
    }

    #[test]
    fn test_monthly_rate() {
        let input = LoanInput::new(dec!(1), dec!(12), 1).unwrap();
        assert_eq!(input.monthly_rate().unwrap(), dec!(0.01));
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "equal_payment".parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::EqualPayment
        );
        assert_eq!(
            "Equal-Principal".parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::EqualPrincipal
        );
        assert_eq!(" bullet ".parse::<RepaymentMethod>().unwrap(), RepaymentMethod::Bullet);
        assert!("balloon".parse::<RepaymentMethod>().is_err());
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(RepaymentMethod::EqualPayment.label(), "원리금균등상환");
        assert_eq!(RepaymentMethod::Bullet.to_string(), "bullet");
    }
}
