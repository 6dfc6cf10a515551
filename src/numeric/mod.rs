// ============================================================================
// Numeric Module
// Decimal money arithmetic for the financial calculators
// ============================================================================
//
// This module provides:
// - Money/Rate aliases over rust_decimal::Decimal
// - MinorUnit: round-half-up to a currency's settlement precision
// - Checked arithmetic returning NumericResult instead of panicking
// - Parsing and grouped display of amounts
//
// Design principles:
// - No floating-point operations in money math
// - All arithmetic returns Result (no panics)

mod errors;
mod money;

pub use errors::{NumericError, NumericResult};
pub use money::{
    checked_add, checked_div, checked_mul, checked_powu, checked_sub, checked_sum, format_money,
    monthly_rate, parse_money, percent_of, round_half_up, MinorUnit, Money, Rate,
};
