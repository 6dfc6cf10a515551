// ============================================================================
// Bullet Repayment
// Interest only until maturity, the whole principal in the last period
// ============================================================================

use crate::domain::{AmortizationRow, LoanInput, LoanResult, RepaymentMethod};
use crate::error::CalcResult;
use crate::interfaces::RepaymentStrategy;
use crate::numeric::{checked_add, checked_mul, MinorUnit};
use rust_decimal::Decimal;

/// Bullet (interest-only) repayment
///
/// The balance never moves before maturity, so the monthly interest is a
/// constant `principal × r`. The headline periodic payment is that interest.
pub struct Bullet {
    minor_unit: MinorUnit,
}

impl Bullet {
    pub fn new(minor_unit: MinorUnit) -> Self {
        Self { minor_unit }
    }
}

impl Default for Bullet {
    fn default() -> Self {
        Self::new(MinorUnit::WHOLE)
    }
}

impl RepaymentStrategy for Bullet {
    fn schedule(&self, input: &LoanInput) -> CalcResult<LoanResult> {
        input.validate()?;

        let rate = input.monthly_rate()?;
        let periods = input.term_months;
        let principal = input.principal;
        let interest = self.minor_unit.round(checked_mul(principal, rate)?);
        let maturity_payment = checked_add(principal, interest)?;

        let schedule = (1..=periods)
            .map(|period| {
                if period < periods {
                    AmortizationRow {
                        period,
                        principal_portion: Decimal::ZERO,
                        interest_portion: interest,
                        payment: interest,
                        remaining_balance: principal,
                    }
                } else {
                    AmortizationRow {
                        period,
                        principal_portion: principal,
                        interest_portion: interest,
                        payment: maturity_payment,
                        remaining_balance: Decimal::ZERO,
                    }
                }
            })
            .collect();

        LoanResult::from_schedule(RepaymentMethod::Bullet, interest, Decimal::ZERO, schedule)
    }

    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::Bullet
    }

    fn minor_unit(&self) -> MinorUnit {
        self.minor_unit
    }
}
