// ============================================================================
// Equal Payment (Annuity) Repayment
// Constant total payment; the principal share grows as the balance shrinks
// ============================================================================

use crate::domain::{AmortizationRow, LoanInput, LoanResult, RepaymentMethod};
use crate::error::CalcResult;
use crate::interfaces::RepaymentStrategy;
use crate::numeric::{
    checked_add, checked_div, checked_mul, checked_powu, checked_sub, MinorUnit, Money,
    NumericError, NumericResult, Rate,
};
use rust_decimal::Decimal;

/// Equal-payment amortization
///
/// The fixed payment is `P × r × (1+r)^n / ((1+r)^n − 1)` rounded half-up to
/// the minor unit. Each period's interest is the rounded `balance × r` and
/// the rest of the payment retires principal. Rounding leaves a residual on
/// the balance after the last period; it is folded into that period's
/// principal and payment so the balance closes at exactly zero.
///
/// # Example
/// ```text
/// 1,200,000 at 12% over 12 months
/// payment = 106,619 (rounded)
/// period 1: interest 12,000, principal 94,619, balance 1,105,381
/// ...
/// period 12: principal absorbs the residual, balance 0
/// ```
pub struct EqualPayment {
    minor_unit: MinorUnit,
}

impl EqualPayment {
    pub fn new(minor_unit: MinorUnit) -> Self {
        Self { minor_unit }
    }
}

impl Default for EqualPayment {
    fn default() -> Self {
        Self::new(MinorUnit::WHOLE)
    }
}

/// Unrounded annuity payment for `principal` over `periods` at periodic `rate`.
///
/// Computed as `principal × r / (1 − (1+r)^−n)` through the discount factor,
/// so long or high-rate terms stay finite: once `(1+r)^n` exceeds the decimal
/// range the discount factor is nil and the payment is the interest-only
/// `principal × r`. A zero rate degenerates to straight-line
/// `principal / periods`, as does a rate so small that `(1+r)^n` is
/// indistinguishable from one.
pub fn annuity_payment(principal: Money, rate: Rate, periods: u32) -> NumericResult<Money> {
    let n = Decimal::from(periods);
    if rate.is_zero() {
        return checked_div(principal, n);
    }

    let interest_only = checked_mul(principal, rate)?;
    let growth = match checked_powu(Decimal::ONE + rate, periods) {
        Ok(growth) => growth,
        Err(NumericError::Overflow) => return Ok(interest_only),
        Err(err) => return Err(err),
    };

    let discount = checked_div(Decimal::ONE, growth)?;
    let denominator = checked_sub(Decimal::ONE, discount)?;
    if denominator.is_zero() {
        return checked_div(principal, n);
    }

    checked_div(interest_only, denominator)
}

impl RepaymentStrategy for EqualPayment {
    fn schedule(&self, input: &LoanInput) -> CalcResult<LoanResult> {
        input.validate()?;

        let unit = self.minor_unit;
        let rate = input.monthly_rate()?;
        let periods = input.term_months;
        let payment = unit.round(annuity_payment(input.principal, rate, periods)?);

        let mut schedule = Vec::with_capacity(periods as usize);
        let mut balance = input.principal;
        let mut final_adjustment = Decimal::ZERO;

        for period in 1..=periods {
            let interest = unit.round(checked_mul(balance, rate)?);
            let mut principal_portion = checked_sub(payment, interest)?;
            let mut row_payment = payment;
            balance = checked_sub(balance, principal_portion)?;

            // Final-period correction: whatever rounding left on the books
            // is paid (or refunded) now.
            if period == periods && !balance.is_zero() {
                final_adjustment = balance;
                principal_portion = checked_add(principal_portion, balance)?;
                row_payment = checked_add(row_payment, balance)?;
                balance = Decimal::ZERO;

                tracing::trace!(
                    period,
                    adjustment = %final_adjustment,
                    "equal payment residual folded into final period"
                );
            }

            schedule.push(AmortizationRow {
                period,
                principal_portion,
                interest_portion: interest,
                payment: row_payment,
                remaining_balance: balance,
            });
        }

        LoanResult::from_schedule(
            RepaymentMethod::EqualPayment,
            payment,
            final_adjustment,
            schedule,
        )
    }

    fn method(&self) -> RepaymentMethod {
        RepaymentMethod::EqualPayment
    }

    fn minor_unit(&self) -> MinorUnit {
        self.minor_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn schedule(principal: Decimal, rate: Decimal, months: u32) -> LoanResult {
        let input = LoanInput::new(principal, rate, months).unwrap();
        EqualPayment::default().schedule(&input).unwrap()
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = schedule(dec!(120_000), Decimal::ZERO, 12);

        assert_eq!(result.periodic_payment, dec!(10_000));
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert_eq!(result.total_payment, dec!(120_000));
        assert_eq!(result.final_adjustment, Decimal::ZERO);
        assert!(result
            .schedule
            .iter()
            .all(|row| row.principal_portion == dec!(10_000)));
    }

    #[test]
    fn test_known_payment() {
        // 1,200,000 at 12%/yr (1%/mo) over 12 months: 106,618.55 -> 106,619
        let result = schedule(dec!(1_200_000), dec!(12), 12);
        assert_eq!(result.periodic_payment, dec!(106_619));

        let first = result.schedule[0];
        assert_eq!(first.interest_portion, dec!(12_000));
        assert_eq!(first.principal_portion, dec!(94_619));
        assert_eq!(first.remaining_balance, dec!(1_105_381));
    }

    #[test]
    fn test_schedule_reconciles() {
        let principal = dec!(300_000_000);
        let result = schedule(principal, dec!(4.35), 360);

        assert_eq!(result.schedule.len(), 360);
        assert_eq!(result.principal_repaid(), principal);
        assert_eq!(result.final_row().unwrap().remaining_balance, Decimal::ZERO);
        assert_eq!(result.total_payment - result.total_interest, principal);

        // Every period before the last pays exactly the annuity
        assert!(result.schedule[..359]
            .iter()
            .all(|row| row.payment == result.periodic_payment));
    }

    #[test]
    fn test_final_adjustment_matches_last_row() {
        let result = schedule(dec!(10_000_000), dec!(7.7), 37);
        let last = result.final_row().unwrap();
        assert_eq!(last.payment - result.periodic_payment, result.final_adjustment);
    }

    #[test]
    fn test_single_period() {
        let result = schedule(dec!(1_000_000), dec!(12), 1);
        let row = result.schedule[0];
        assert_eq!(row.interest_portion, dec!(10_000));
        assert_eq!(row.principal_portion, dec!(1_000_000));
        assert_eq!(row.payment, dec!(1_010_000));
        assert_eq!(row.remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_cents_currency() {
        let input = LoanInput::new(dec!(25_000), dec!(6.5), 60).unwrap();
        let result = EqualPayment::new(MinorUnit::CENTS).schedule(&input).unwrap();
        assert_eq!(result.periodic_payment, dec!(489.15));
        assert_eq!(result.principal_repaid(), dec!(25_000));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        assert_eq!(
            annuity_payment(dec!(100), Decimal::ZERO, 4).unwrap(),
            dec!(25)
        );
    }

    #[test]
    fn test_long_high_rate_term_stays_finite() {
        // (1 + 1/12)^900 is beyond the decimal range
        let result = schedule(dec!(10_000_000), dec!(100), 900);

        assert_eq!(result.schedule.len(), 900);
        assert_eq!(result.periodic_payment, dec!(833_333));
        assert_eq!(result.principal_repaid(), dec!(10_000_000));
        assert_eq!(result.final_row().unwrap().remaining_balance, Decimal::ZERO);
        assert_eq!(
            result.total_payment,
            dec!(10_000_000) + result.total_interest
        );
    }

    #[test]
    fn test_annuity_payment_matches_closed_form() {
        let rate = dec!(0.01);
        let payment = annuity_payment(dec!(1_200_000), rate, 12).unwrap();
        assert_eq!(MinorUnit::WHOLE.round(payment), dec!(106_619));
        assert_eq!(
            annuity_payment(dec!(1_200), dec!(10), 1_200).unwrap(),
            dec!(12_000)
        );
    }
}
