// ============================================================================
// Engine Module
// Repayment strategies, savings and severance computations, and the
// configured calculator facade
// ============================================================================

mod bullet;
mod calculator;
mod equal_payment;
mod equal_principal;
mod savings;
mod severance;

pub mod factory;

pub use bullet::Bullet;
pub use calculator::Calculator;
pub use equal_payment::{annuity_payment, EqualPayment};
pub use equal_principal::EqualPrincipal;
pub use factory::{amortize, create_from_config, create_repayment_strategy, CalculatorBuilder};
pub use savings::accumulate_savings;
pub use severance::{
    calculate_severance, retirement_income_tax, service_days, service_year_deduction,
};
