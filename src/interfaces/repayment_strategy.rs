// ============================================================================
// Repayment Strategy Interface
// Defines the contract for pluggable loan repayment schedules
// ============================================================================

use crate::domain::{LoanInput, LoanResult, RepaymentMethod};
use crate::error::CalcResult;
use crate::numeric::MinorUnit;

/// Strategy pattern interface for loan repayment schedules
/// Implementations: EqualPayment (annuity), EqualPrincipal, Bullet
pub trait RepaymentStrategy: Send + Sync {
    /// Build the full repayment schedule for a loan
    ///
    /// # Arguments
    /// * `input` - Principal, annual rate and term
    ///
    /// # Returns
    /// One row per period plus reconciled totals
    fn schedule(&self, input: &LoanInput) -> CalcResult<LoanResult>;

    /// The method this strategy implements
    fn method(&self) -> RepaymentMethod;

    /// Settlement precision every portion is rounded to
    fn minor_unit(&self) -> MinorUnit;

    /// Get the strategy name for logging
    fn name(&self) -> &str {
        self.method().name()
    }
}
