// ============================================================================
// Life Calculator Library
// Deterministic everyday calculators with pluggable loan repayment strategies
// ============================================================================

//! # Life Calc
//!
//! Pure, repeatable calculators for everyday money, health, date and unit
//! questions.
//!
//! ## Features
//!
//! - **Loan amortization** with pluggable repayment strategies (equal
//!   payment, equal principal, bullet) whose schedules reconcile exactly
//! - **Installment savings** under simple or compound interest
//! - **Severance pay** with the service-year deduction and progressive
//!   retirement income tax
//! - **Formulas** for BMI, daily calories, stacked discounts, D-Day
//!   countdowns, world clocks and unit conversion
//! - **Decimal money** rounded half-up to the currency's minor unit
//!
//! ## Example
//!
//! ```rust
//! use life_calc::prelude::*;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let calculator = CalculatorBuilder::new()
//!     .event_handler(Arc::new(NoOpEventHandler))
//!     .build()
//!     .unwrap();
//!
//! // 1,200,000 won over 12 months at 12% a year
//! let input = LoanInput::new(dec!(1_200_000), dec!(12), 12).unwrap();
//! let result = calculator.loan(RepaymentMethod::EqualPayment, &input).unwrap();
//!
//! assert_eq!(result.schedule.len(), 12);
//! assert_eq!(result.schedule[11].remaining_balance, dec!(0));
//! assert_eq!(result.total_payment, input.principal + result.total_interest);
//! println!("monthly payment: {}", format_money(result.periodic_payment, MinorUnit::WHOLE));
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod form;
pub mod formulas;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AmortizationRow, CalculatorConfig, CurrencyConfig, DepositTiming, InterestMethod,
        LoanInput, LoanResult, RepaymentMethod, SavingsInput, SavingsResult, SeveranceInput,
        SeveranceResult, SeveranceRules,
    };
    pub use crate::engine::{
        accumulate_savings, amortize, calculate_severance, create_from_config, Bullet, Calculator,
        CalculatorBuilder, EqualPayment, EqualPrincipal,
    };
    pub use crate::error::{CalcError, CalcResult};
    pub use crate::form::FormFields;
    pub use crate::formulas::{
        calculate_bmi, calculate_calories, calculate_dday, calculate_discount, convert_codes,
        ActivityLevel, BmiInput, City, CalorieInput, DdayInput, DiscountInput, Gender,
        UnitCategory, UtcOffset,
    };
    pub use crate::interfaces::{
        CalculationEvent, EventHandler, FromForm, LoggingEventHandler, NoOpEventHandler,
        RecordingEventHandler, RepaymentStrategy,
    };
    pub use crate::numeric::{format_money, MinorUnit, Money, Rate};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn test_end_to_end_forms() {
        let handler = Arc::new(RecordingEventHandler::new());
        let calculator = CalculatorBuilder::new()
            .event_handler(handler.clone())
            .build()
            .unwrap();

        // Loan page
        let loan = calculator
            .loan_from_form(
                &FormFields::new()
                    .with("loan_type", "equalPrincipalInterest")
                    .with("principal", "300,000,000")
                    .with("annual_rate", "4.35")
                    .with("months", "360"),
            )
            .unwrap();
        assert_eq!(loan.schedule.len(), 360);
        assert_eq!(loan.principal_repaid(), dec!(300_000_000));
        assert_eq!(loan.final_row().map(|r| r.remaining_balance), Some(dec!(0)));

        // Savings page
        let savings = calculator
            .savings_from_form(
                &FormFields::new()
                    .with("interest_type", "compound")
                    .with("monthly_deposit", "100,000")
                    .with("months", "12")
                    .with("annual_rate", "12"),
            )
            .unwrap();
        assert_eq!(savings.final_balance, dec!(1_280_933));

        // Severance page with a blank field never reaches the computation
        let rejected = calculator.severance_from_form(
            &FormFields::new()
                .with("monthly_salary", "3,000,000")
                .with("years", "")
                .with("months", "0"),
        );
        assert!(rejected.is_err());

        let events = handler.drain();
        assert!(matches!(events[0], CalculationEvent::LoanScheduled { periods: 360, .. }));
        assert!(events
            .iter()
            .any(|e| matches!(e, CalculationEvent::SavingsAccumulated { .. })));
        assert!(matches!(
            events.last(),
            Some(CalculationEvent::InputRejected { calculator: "severance", .. })
        ));
        assert!(!events
            .iter()
            .any(|e| matches!(e, CalculationEvent::SeveranceComputed { .. })));
    }

    #[test]
    fn test_every_method_reconciles() {
        let input = LoanInput::new(dec!(50_000_000), dec!(5.5), 37).unwrap();
        for method in RepaymentMethod::ALL {
            let result = amortize(method, &input).unwrap();
            assert_eq!(result.total_payment, input.principal + result.total_interest);
            assert_eq!(result.principal_repaid(), input.principal);
            assert_eq!(result.schedule.len(), 37);
        }
    }
}
