// ============================================================================
// Equal Principal Repayment
// Constant principal portion; interest and total payment decline each period
// ============================================================================

use crate::domain::{AmortizationRow, LoanInput, LoanResult, RepaymentMethod};
use crate::error::CalcResult;
use crate::interfaces::RepaymentStrategy;
use crate::numeric::{checked_add, checked_div, checked_mul, checked_sub, MinorUnit};
use rust_decimal::Decimal;

/// Equal-principal amortization
///
/// Each period retires `principal / n` rounded half-up, never more than the
/// remaining balance. The last period retires whatever is left, so the
/// portions always sum to the borrowed principal. Interest is charged on the
/// balance outstanding at the start of the period.
pub struct EqualPrincipal {
    minor_unit: MinorUnit,
}

impl EqualPrincipal {
    pub fn new(minor_unit: MinorUnit) -> Self {
        Self { minor_unit }
    }
}

impl Default for EqualPrincipal {
    fn default() -> Self {
        Self::new(MinorUnit::WHOLE)
    }
}

impl RepaymentStrategy for EqualPrincipal {
    fn schedule(&self, input: &LoanInput) -> CalcResult<LoanResult> {
        input.validate()?;

        let unit = self.minor_unit;
        let rate = input.monthly_rate()?;
        let periods = input.term_months;
        let portion = unit.round(checked_div(input.principal, Decimal::from(periods))?);

        let mut schedule = Vec::with_capacity(periods as usize);
        let mut balance = input.principal;
        let mut final_adjustment = Decimal::ZERO;

        for period in 1..=periods {
            let interest = unit.round(checked_mul(balance, rate)?);
            let principal_portion = if period == periods {
                final_adjustment = checked_sub(balance, portion)?;
                balance
            } else {
                portion.min(balance)
            };
            let payment = checked_add(principal_portion, interest)?;
            balance = checked_sub(balance, principal_portion)?;

            schedule.push(AmortizationRow {
                period,
                principal_portion,
                interest_portion: interest,
                payment,
                remaining_balance: balance,
            });
        }

        if !final_adjustment.is_zero() {
            tracing::trace!(
                adjustment = %final_adjustment,
                "equal principal residual folded into final period"
            );
        }

        let first_payment = schedule.first().map_or(Decimal::ZERO, |row| row.payment);
        LoanResult::from_schedule(
            RepaymentMethod::EqualPrincipal,
            first_payment,
            final_adjustment,
            schedule,
        )
    }

    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::EqualPrincipal
    }

    fn minor_unit(&self) -> MinorUnit {
        self.minor_unit
    }
}
