// ============================================================================
// Savings Accumulation
// Monthly installment savings under simple or compound interest
// ============================================================================

use crate::domain::{DepositTiming, InterestMethod, SavingsInput, SavingsResult, SavingsRow};
use crate::error::CalcResult;
use crate::numeric::{checked_add, checked_mul, checked_sub, MinorUnit, Money, Rate};
use rust_decimal::Decimal;

/// Build the savings schedule for `input`.
///
/// Balances are carried at full decimal precision and only the reported
/// figures are rounded to `unit`. Total interest is derived from the rounded
/// final balance and total deposits, so the three totals reconcile exactly.
pub fn accumulate_savings(input: &SavingsInput, unit: MinorUnit) -> CalcResult<SavingsResult> {
    input.validate()?;
    let rate = input.monthly_rate()?;

    let (deposited, balance, schedule) = match input.method {
        InterestMethod::Simple => simple_interest(input, rate, unit)?,
        InterestMethod::Compound => compound_interest(input, rate, unit)?,
    };

    let total_deposited = unit.round(deposited);
    let final_balance = unit.round(balance);
    Ok(SavingsResult {
        method: input.method,
        total_deposited,
        total_interest: checked_sub(final_balance, total_deposited)?,
        final_balance,
        schedule,
    })
}

type Accumulation = (Money, Money, Vec<SavingsRow>);

/// Deposit `k` earns `deposit × r × periods_held(k)`; interest never compounds.
fn simple_interest(input: &SavingsInput, rate: Rate, unit: MinorUnit) -> CalcResult<Accumulation> {
    let periods = input.num_periods;
    let deposit = input.periodic_deposit;

    let mut deposited = Decimal::ZERO;
    let mut interest_total = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        deposited = checked_add(deposited, deposit)?;
        let held = Decimal::from(input.timing.periods_held(period, periods));
        let interest = checked_mul(checked_mul(deposit, rate)?, held)?;
        interest_total = checked_add(interest_total, interest)?;

        schedule.push(SavingsRow {
            period,
            deposit: unit.round(deposit),
            interest_accrued: unit.round(interest),
            balance: unit.round(checked_add(deposited, interest_total)?),
        });
    }

    let balance = checked_add(deposited, interest_total)?;
    Ok((deposited, balance, schedule))
}

/// `balance_k = (balance_{k−1} + deposit) × (1+r)` for start-of-period
/// deposits, `balance_{k−1} × (1+r) + deposit` for end-of-period ones.
fn compound_interest(
    input: &SavingsInput,
    rate: Rate,
    unit: MinorUnit,
) -> CalcResult<Accumulation> {
    let periods = input.num_periods;
    let deposit = input.periodic_deposit;
    let growth = Decimal::ONE + rate;

    let mut deposited = Decimal::ZERO;
    let mut balance = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        balance = match input.timing {
            DepositTiming::StartOfPeriod => checked_mul(checked_add(balance, deposit)?, growth)?,
            DepositTiming::EndOfPeriod => checked_add(checked_mul(balance, growth)?, deposit)?,
        };
        deposited = checked_add(deposited, deposit)?;

        schedule.push(SavingsRow {
            period,
            deposit: unit.round(deposit),
            interest_accrued: unit.round(checked_sub(balance, deposited)?),
            balance: unit.round(balance),
        });
    }

    Ok((deposited, balance, schedule))
}
