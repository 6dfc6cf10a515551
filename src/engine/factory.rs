// ============================================================================
// Calculator Factory
// Creates repayment strategies and configured calculators
// ============================================================================

use crate::domain::config::{CalculatorConfig, CurrencyConfig, SeveranceRules};
use crate::domain::{LoanInput, LoanResult, RepaymentMethod};
use crate::engine::{Bullet, Calculator, EqualPayment, EqualPrincipal};
use crate::error::CalcResult;
use crate::interfaces::{EventHandler, NoOpEventHandler, RepaymentStrategy};
use crate::numeric::MinorUnit;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates the repayment strategy for a method.
///
/// The match is exhaustive: adding a `RepaymentMethod` variant without a
/// strategy does not compile.
pub fn create_repayment_strategy(
    method: RepaymentMethod,
    minor_unit: MinorUnit,
) -> Box<dyn RepaymentStrategy> {
    match method {
        RepaymentMethod::EqualPayment => Box::new(EqualPayment::new(minor_unit)),
        RepaymentMethod::EqualPrincipal => Box::new(EqualPrincipal::new(minor_unit)),
        RepaymentMethod::Bullet => Box::new(Bullet::new(minor_unit)),
    }
}

/// Build a repayment schedule in whole currency units.
///
/// # Example
/// ```
/// use life_calc::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let input = LoanInput::new(dec!(120_000), dec!(0), 12).unwrap();
/// let result = amortize(RepaymentMethod::EqualPayment, &input).unwrap();
/// assert_eq!(result.periodic_payment, dec!(10_000));
/// assert_eq!(result.total_interest, dec!(0));
/// ```
pub fn amortize(method: RepaymentMethod, input: &LoanInput) -> CalcResult<LoanResult> {
    create_repayment_strategy(method, MinorUnit::WHOLE).schedule(input)
}

/// Creates a calculator from configuration
///
/// # Errors
/// `InvalidConfig` if the configuration fails validation.
pub fn create_from_config(
    config: CalculatorConfig,
    event_handler: Arc<dyn EventHandler>,
) -> CalcResult<Calculator> {
    Calculator::new(config, event_handler)
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating calculators with fluent API
///
/// # Example
/// ```
/// use life_calc::prelude::*;
/// use std::sync::Arc;
///
/// let calculator = CalculatorBuilder::new()
///     .currency(CurrencyConfig::krw())
///     .severance_rules(SeveranceRules::korea())
///     .event_handler(Arc::new(LoggingEventHandler))
///     .build()
///     .unwrap();
/// assert_eq!(calculator.config().currency.code, "KRW");
/// ```
pub struct CalculatorBuilder {
    config: CalculatorConfig,
    event_handler: Arc<dyn EventHandler>,
}

impl CalculatorBuilder {
    /// Korean won defaults, events discarded
    pub fn new() -> Self {
        Self {
            config: CalculatorConfig::default(),
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: CalculatorConfig) -> Self {
        Self {
            config,
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Set the settlement currency
    pub fn currency(mut self, currency: CurrencyConfig) -> Self {
        self.config.currency = currency;
        self
    }

    /// Set only the minor unit of the current currency
    pub fn minor_unit(mut self, minor_unit: MinorUnit) -> Self {
        self.config.currency.minor_unit = minor_unit;
        self
    }

    /// Set the severance and retirement tax rules
    pub fn severance_rules(mut self, rules: SeveranceRules) -> Self {
        self.config.severance = rules;
        self
    }

    /// Set the event handler
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    /// Build the calculator
    pub fn build(self) -> CalcResult<Calculator> {
        create_from_config(self.config, self.event_handler)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &CalculatorConfig {
        &self.config
    }
}

impl Default for CalculatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
