// ============================================================================
// Severance Domain Model
// ============================================================================

use crate::error::CalcResult;
use crate::numeric::Money;

use super::ensure_non_negative;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeveranceInput {
    /// Average monthly wage
    pub monthly_wage: Money,
    /// Full years of service
    pub service_years: u32,
    /// Extra months beyond the full years
    pub service_months: u32,
}

impl SeveranceInput {
    pub fn new(monthly_wage: Money, service_years: u32, service_months: u32) -> CalcResult<Self> {
        let input = Self {
            monthly_wage,
            service_years,
            service_months,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("monthly_wage", self.monthly_wage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeveranceResult {
    /// years × 365 + months × 30 under the default rules
    pub total_service_days: u32,
    pub gross_severance: Money,
    /// Service-year deduction subtracted before tax
    pub deduction: Money,
    /// max(gross − deduction, 0)
    pub tax_base: Money,
    pub national_income_tax: Money,
    pub local_income_tax: Money,
    /// gross − national − local
    pub net_amount: Money,
}

impl SeveranceResult {
    pub fn total_tax(&self) -> Money {
        self.national_income_tax + self.local_income_tax
    }
}
