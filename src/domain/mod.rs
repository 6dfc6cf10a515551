// ============================================================================
// Domain Models Module
// Input and result records of the money calculators, plus configuration
// ============================================================================

pub mod config;
pub mod loan;
pub mod savings;
pub mod severance;

pub use config::{CalculatorConfig, CurrencyConfig, PiecewiseSchedule, SeveranceRules, Tier};
pub use loan::{AmortizationRow, LoanInput, LoanResult, RepaymentMethod};
pub use savings::{DepositTiming, InterestMethod, SavingsInput, SavingsResult, SavingsRow};
pub use severance::{SeveranceInput, SeveranceResult};

use crate::error::{CalcError, CalcResult};
use rust_decimal::Decimal;

pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> CalcResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalcError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}

/// Longest schedule accepted: 100 years of monthly periods
pub const MAX_PERIODS: u32 = 1200;

pub(crate) fn ensure_period_count(field: &str, value: u32) -> CalcResult<()> {
    if value == 0 {
        return Err(CalcError::invalid_input(field, "must be at least 1"));
    }
    if value > MAX_PERIODS {
        return Err(CalcError::invalid_input(
            field,
            format!("must be at most {MAX_PERIODS}"),
        ));
    }
    Ok(())
}
