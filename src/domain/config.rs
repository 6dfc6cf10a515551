// ============================================================================
// Calculator Configuration
// Currency settlement and severance tax rules
// ============================================================================

use crate::error::{CalcError, CalcResult};
use crate::numeric::{
    checked_add, checked_mul, checked_sub, MinorUnit, Money, NumericResult, Rate,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Currency
// ============================================================================

/// Currency the money calculators settle in
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrencyConfig {
    /// ISO 4217 code (e.g., "KRW", "USD")
    pub code: String,

    /// Settlement precision; every reported amount is rounded half-up to it
    pub minor_unit: MinorUnit,
}

impl CurrencyConfig {
    pub fn new(code: impl Into<String>, minor_unit: MinorUnit) -> Self {
        Self {
            code: code.into(),
            minor_unit,
        }
    }

    /// Korean won, settled in whole units
    pub fn krw() -> Self {
        Self::new("KRW", MinorUnit::WHOLE)
    }

    /// US dollar, settled in cents
    pub fn usd() -> Self {
        Self::new("USD", MinorUnit::CENTS)
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self::krw()
    }
}

// ============================================================================
// Piecewise-Linear Schedules
// ============================================================================

/// One segment of a piecewise-linear schedule.
///
/// For an input `x` falling in this tier the schedule yields
/// `base + marginal × (x − floor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tier {
    /// Lower bound of the tier (exclusive, except for the first tier)
    pub floor: Decimal,
    /// Value accumulated by all lower tiers at `floor`
    pub base: Decimal,
    /// Amount added per unit above `floor`
    pub marginal: Decimal,
}

impl Tier {
    pub const fn new(floor: Decimal, base: Decimal, marginal: Decimal) -> Self {
        Self {
            floor,
            base,
            marginal,
        }
    }
}

/// Ordered tiers evaluated as a piecewise-linear function.
///
/// Used both for the service-year deduction and for progressive tax
/// brackets: an input exactly on a boundary belongs to the lower tier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PiecewiseSchedule {
    tiers: Vec<Tier>,
}

impl PiecewiseSchedule {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Tier an input falls into.
    pub fn tier_for(&self, x: Decimal) -> Option<&Tier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| x > tier.floor)
            .or_else(|| self.tiers.first())
    }

    /// Evaluate the schedule at `x`. Non-positive inputs and an empty
    /// schedule evaluate to zero.
    pub fn evaluate(&self, x: Decimal) -> NumericResult<Decimal> {
        if x <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        match self.tier_for(x) {
            Some(tier) => {
                let excess = checked_sub(x, tier.floor)?;
                checked_add(tier.base, checked_mul(excess, tier.marginal)?)
            }
            None => Ok(Decimal::ZERO),
        }
    }

    fn validate(&self, what: &str) -> CalcResult<()> {
        if self.tiers.is_empty() {
            return Err(CalcError::invalid_config(format!("{what} has no tiers")));
        }
        if self.tiers.iter().any(|t| t.marginal < Decimal::ZERO || t.base < Decimal::ZERO) {
            return Err(CalcError::invalid_config(format!(
                "{what} tiers cannot have negative amounts"
            )));
        }
        if self.tiers.windows(2).any(|w| w[0].floor >= w[1].floor) {
            return Err(CalcError::invalid_config(format!(
                "{what} tiers must be strictly ascending"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Severance Rules
// ============================================================================

/// Parameters of the severance pay and retirement income tax computation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeveranceRules {
    /// Days counted per full service year
    pub days_per_year: u32,

    /// Days counted per extra service month (calendar approximation)
    pub days_per_month: u32,

    /// Days of average wage paid per service year
    pub wage_days: u32,

    /// Service-year deduction, keyed by years of service
    pub deduction: PiecewiseSchedule,

    /// Progressive income tax brackets, keyed by tax base
    pub income_tax: PiecewiseSchedule,

    /// Local income tax as a fraction of income tax (0.1 = 10%)
    pub local_tax_rate: Rate,
}

impl SeveranceRules {
    /// Korean retirement pay rules.
    ///
    /// Deduction: 300k/yr up to 5 years, then 1.5M + 500k/yr to 10, 4M +
    /// 700k/yr to 20, 11M + 1M/yr beyond. Brackets at 12M/46M/88M/150M with
    /// marginal rates 6/15/24/35/38%. Local tax is 10% of income tax.
    pub fn korea() -> Self {
        Self {
            days_per_year: 365,
            days_per_month: 30,
            wage_days: 30,
            deduction: PiecewiseSchedule::new(vec![
                Tier::new(dec!(0), dec!(0), dec!(300_000)),
                Tier::new(dec!(5), dec!(1_500_000), dec!(500_000)),
                Tier::new(dec!(10), dec!(4_000_000), dec!(700_000)),
                Tier::new(dec!(20), dec!(11_000_000), dec!(1_000_000)),
            ]),
            income_tax: PiecewiseSchedule::new(vec![
                Tier::new(dec!(0), dec!(0), dec!(0.06)),
                Tier::new(dec!(12_000_000), dec!(720_000), dec!(0.15)),
                Tier::new(dec!(46_000_000), dec!(5_820_000), dec!(0.24)),
                Tier::new(dec!(88_000_000), dec!(15_900_000), dec!(0.35)),
                Tier::new(dec!(150_000_000), dec!(37_600_000), dec!(0.38)),
            ]),
            local_tax_rate: dec!(0.1),
        }
    }

    /// Builder method: replace the deduction schedule
    pub fn with_deduction(mut self, deduction: PiecewiseSchedule) -> Self {
        self.deduction = deduction;
        self
    }

    /// Builder method: replace the income tax brackets
    pub fn with_income_tax(mut self, income_tax: PiecewiseSchedule) -> Self {
        self.income_tax = income_tax;
        self
    }

    /// Builder method: set the local income tax rate
    pub fn with_local_tax_rate(mut self, rate: Rate) -> Self {
        self.local_tax_rate = rate;
        self
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.days_per_year == 0 || self.wage_days == 0 {
            return Err(CalcError::invalid_config(
                "days per year and wage days must be positive",
            ));
        }
        if self.local_tax_rate < Decimal::ZERO || self.local_tax_rate > Decimal::ONE {
            return Err(CalcError::invalid_config(
                "local tax rate must be between 0 and 1",
            ));
        }
        self.deduction.validate("deduction schedule")?;
        self.income_tax.validate("income tax schedule")?;
        if self
            .income_tax
            .tiers()
            .iter()
            .any(|t| t.marginal > Decimal::ONE)
        {
            return Err(CalcError::invalid_config(
                "marginal tax rates must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

impl Default for SeveranceRules {
    fn default() -> Self {
        Self::korea()
    }
}

// ============================================================================
// Complete Calculator Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorConfig {
    pub currency: CurrencyConfig,
    pub severance: SeveranceRules,
}

impl CalculatorConfig {
    pub fn new(currency: CurrencyConfig, severance: SeveranceRules) -> Self {
        Self {
            currency,
            severance,
        }
    }

    /// Builder method: set the settlement currency
    pub fn with_currency(mut self, currency: CurrencyConfig) -> Self {
        self.currency = currency;
        self
    }

    /// Builder method: set the severance rules
    pub fn with_severance_rules(mut self, rules: SeveranceRules) -> Self {
        self.severance = rules;
        self
    }

    /// Minor unit all money results are rounded to
    pub fn minor_unit(&self) -> MinorUnit {
        self.currency.minor_unit
    }

    /// Round an amount to the configured currency
    pub fn round(&self, value: Money) -> Money {
        self.currency.minor_unit.round(value)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CalcResult<()> {
        if self.currency.code.trim().is_empty() {
            return Err(CalcError::invalid_config("currency code cannot be empty"));
        }
        if MinorUnit::new(self.currency.minor_unit.scale()).is_err() {
            return Err(CalcError::invalid_config("minor unit scale must be at most 28"));
        }
        self.severance.validate()
    }

    /// Load a configuration from JSON and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CalcError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::invalid_config(e.to_string()))
    }
}
