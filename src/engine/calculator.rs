// ============================================================================
// Calculator
// Configured facade over every calculator, reporting to an event handler
// ============================================================================

use crate::domain::{
    CalculatorConfig, LoanInput, LoanResult, RepaymentMethod, SavingsInput, SavingsResult,
    SeveranceInput, SeveranceResult,
};
use crate::engine::factory::create_repayment_strategy;
use crate::engine::savings::accumulate_savings;
use crate::engine::severance::calculate_severance;
use crate::error::CalcResult;
use crate::form::FormFields;
use crate::formulas::{
    calculate_bmi, calculate_calories, calculate_dday, calculate_discount, convert_codes,
    BmiInput, BmiResult, CalorieInput, CalorieResult, DdayInput, DdayResult, DiscountInput,
    DiscountResult, UnitCategory,
};
use crate::interfaces::{CalculationEvent, EventHandler, FromForm};
use chrono::{DateTime, TimeZone};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

/// Calculator bound to one currency and one set of severance rules.
///
/// Stateless apart from its configuration: every call is independent and
/// repeatable, so a single instance can be shared across threads.
pub struct Calculator {
    /// Validated configuration
    config: CalculatorConfig,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl Calculator {
    /// Create a calculator after validating `config`
    pub fn new(config: CalculatorConfig, event_handler: Arc<dyn EventHandler>) -> CalcResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            event_handler,
        })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Money calculators
    // ------------------------------------------------------------------------

    /// Repayment schedule for `input` under `method`
    pub fn loan(&self, method: RepaymentMethod, input: &LoanInput) -> CalcResult<LoanResult> {
        let strategy = create_repayment_strategy(method, self.config.minor_unit());
        let result = self.guard("loan", strategy.schedule(input))?;

        let mut events: SmallVec<[CalculationEvent; 2]> = smallvec![CalculationEvent::LoanScheduled {
            method,
            principal: input.principal,
            periods: input.term_months,
            periodic_payment: result.periodic_payment,
            total_interest: result.total_interest,
        }];
        if !result.final_adjustment.is_zero() {
            events.push(CalculationEvent::ResidualAdjusted {
                method,
                period: input.term_months,
                adjustment: result.final_adjustment,
            });
        }
        self.event_handler.on_events(events.into_vec());

        Ok(result)
    }

    pub fn savings(&self, input: &SavingsInput) -> CalcResult<SavingsResult> {
        let result = self.guard(
            "savings",
            accumulate_savings(input, self.config.minor_unit()),
        )?;
        self.event_handler
            .on_event(CalculationEvent::SavingsAccumulated {
                method: input.method,
                periods: input.num_periods,
                final_balance: result.final_balance,
            });
        Ok(result)
    }

    pub fn severance(&self, input: &SeveranceInput) -> CalcResult<SeveranceResult> {
        let result = self.guard(
            "severance",
            calculate_severance(input, &self.config.severance, self.config.minor_unit()),
        )?;
        self.event_handler
            .on_event(CalculationEvent::SeveranceComputed {
                service_days: result.total_service_days,
                gross_severance: result.gross_severance,
                net_amount: result.net_amount,
            });
        Ok(result)
    }

    pub fn discount(&self, input: &DiscountInput) -> CalcResult<DiscountResult> {
        self.guard(
            "discount",
            calculate_discount(input, self.config.minor_unit()),
        )
    }

    // ------------------------------------------------------------------------
    // Formula calculators
    // ------------------------------------------------------------------------

    pub fn bmi(&self, input: &BmiInput) -> CalcResult<BmiResult> {
        self.guard("bmi", calculate_bmi(input))
    }

    pub fn calories(&self, input: &CalorieInput) -> CalcResult<CalorieResult> {
        self.guard("calorie", calculate_calories(input))
    }

    pub fn dday<Tz: TimeZone>(&self, input: &DdayInput, now: &DateTime<Tz>) -> CalcResult<DdayResult> {
        self.guard("dday", calculate_dday(input, now))
    }

    pub fn convert_units(
        &self,
        category: UnitCategory,
        value: f64,
        from: &str,
        to: &str,
    ) -> CalcResult<f64> {
        self.guard("units", convert_codes(category, value, from, to))
    }

    // ------------------------------------------------------------------------
    // Form entry points
    // ------------------------------------------------------------------------

    /// Parse `loan_type`, `principal`, `annual_rate` and `months`, then
    /// schedule the loan
    pub fn loan_from_form(&self, fields: &FormFields) -> CalcResult<LoanResult> {
        let method: RepaymentMethod = self.parse_form("loan", fields)?;
        let input: LoanInput = self.parse_form("loan", fields)?;
        self.loan(method, &input)
    }

    pub fn savings_from_form(&self, fields: &FormFields) -> CalcResult<SavingsResult> {
        let input: SavingsInput = self.parse_form("savings", fields)?;
        self.savings(&input)
    }

    pub fn severance_from_form(&self, fields: &FormFields) -> CalcResult<SeveranceResult> {
        let input: SeveranceInput = self.parse_form("severance", fields)?;
        self.severance(&input)
    }

    pub fn bmi_from_form(&self, fields: &FormFields) -> CalcResult<BmiResult> {
        let input: BmiInput = self.parse_form("bmi", fields)?;
        self.bmi(&input)
    }

    pub fn calories_from_form(&self, fields: &FormFields) -> CalcResult<CalorieResult> {
        let input: CalorieInput = self.parse_form("calorie", fields)?;
        self.calories(&input)
    }

    pub fn discount_from_form(&self, fields: &FormFields) -> CalcResult<DiscountResult> {
        let input: DiscountInput = self.parse_form("discount", fields)?;
        self.discount(&input)
    }

    /// Parse `target_date` and count the days from `now`
    pub fn dday_from_form<Tz: TimeZone>(
        &self,
        fields: &FormFields,
        now: &DateTime<Tz>,
    ) -> CalcResult<DdayResult> {
        let input: DdayInput = self.parse_form("dday", fields)?;
        self.dday(&input, now)
    }

    fn parse_form<T: FromForm>(&self, calculator: &'static str, fields: &FormFields) -> CalcResult<T> {
        self.guard(calculator, T::from_form(fields))
    }

    /// Report validation failures before handing the result back
    fn guard<T>(&self, calculator: &'static str, result: CalcResult<T>) -> CalcResult<T> {
        if let Err(err) = &result {
            if err.is_validation() {
                self.event_handler.on_event(CalculationEvent::InputRejected {
                    calculator,
                    reason: err.to_string(),
                });
            } else {
                tracing::warn!(calculator, error = %err, "calculation failed");
            }
        }
        result
    }
}
