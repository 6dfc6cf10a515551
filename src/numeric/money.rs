// ============================================================================
// Money Arithmetic
// Decimal helpers for currency amounts: rounding, rates, checked operations
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Currency amount. Always a decimal, never a binary float.
pub type Money = Decimal;

/// Rate or percentage used in money math.
pub type Rate = Decimal;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Largest scale `rust_decimal` can carry.
const MAX_SCALE: u32 = 28;

// ============================================================================
// Minor Unit
// ============================================================================

/// Number of decimal places a currency settles to.
///
/// Korean won settles to whole units (scale 0); most other currencies use
/// cents (scale 2). All monetary rounding goes through [`MinorUnit::round`],
/// which rounds exact halves away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinorUnit(u32);

impl MinorUnit {
    /// Whole currency units (KRW, JPY)
    pub const WHOLE: Self = Self(0);

    /// Hundredths (USD, EUR)
    pub const CENTS: Self = Self(2);

    /// # Errors
    /// Returns `InvalidInput` if `scale` exceeds what a decimal can hold.
    pub fn new(scale: u32) -> NumericResult<Self> {
        if scale > MAX_SCALE {
            return Err(NumericError::InvalidInput);
        }
        Ok(Self(scale))
    }

    #[inline]
    pub const fn scale(self) -> u32 {
        self.0
    }

    /// Round half-up to this minor unit.
    #[inline]
    pub fn round(self, value: Money) -> Money {
        round_half_up(value, self.0)
    }
}

impl Default for MinorUnit {
    fn default() -> Self {
        Self::WHOLE
    }
}

/// Round to `scale` decimal places; halves go away from zero.
#[inline]
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

// ============================================================================
// Rates
// ============================================================================

/// Convert an annual percentage (e.g. `5.5` for 5.5%) to a monthly fraction.
#[inline]
pub fn monthly_rate(annual_rate_percent: Rate) -> NumericResult<Rate> {
    checked_div(checked_div(annual_rate_percent, PERCENT)?, MONTHS_PER_YEAR)
}

/// `value × percent / 100`
#[inline]
pub fn percent_of(value: Money, percent: Rate) -> NumericResult<Money> {
    checked_div(checked_mul(value, percent)?, PERCENT)
}

// ============================================================================
// Checked Arithmetic
// ============================================================================

#[inline]
pub fn checked_add(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    lhs.checked_add(rhs).ok_or(if rhs.is_sign_negative() {
        NumericError::Underflow
    } else {
        NumericError::Overflow
    })
}

#[inline]
pub fn checked_sub(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    lhs.checked_sub(rhs).ok_or(if rhs.is_sign_negative() {
        NumericError::Overflow
    } else {
        NumericError::Underflow
    })
}

#[inline]
pub fn checked_mul(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    lhs.checked_mul(rhs).ok_or(NumericError::Overflow)
}

#[inline]
pub fn checked_div(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    if rhs.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(NumericError::Overflow)
}

/// `base^exp` for a whole exponent.
#[inline]
pub fn checked_powu(base: Decimal, exp: u32) -> NumericResult<Decimal> {
    base.checked_powu(u64::from(exp))
        .ok_or(NumericError::Overflow)
}

/// Sum a sequence of amounts without silent overflow.
pub fn checked_sum<I>(values: I) -> NumericResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, checked_add)
}

// ============================================================================
// Parsing and Display
// ============================================================================

/// Parse a user-entered amount. Accepts `,` digit grouping ("1,500,000").
///
/// # Errors
/// Returns `InvalidInput` for blank or non-numeric text.
pub fn parse_money(s: &str) -> NumericResult<Money> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(NumericError::InvalidInput);
    }
    Decimal::from_str(&cleaned).map_err(|_| NumericError::InvalidInput)
}

/// Render an amount rounded to `unit` with `,` thousands separators.
///
/// ```
/// use life_calc::numeric::{format_money, MinorUnit};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_money(dec!(1234567.5), MinorUnit::WHOLE), "1,234,568");
/// assert_eq!(format_money(dec!(-1234.5), MinorUnit::CENTS), "-1,234.50");
/// ```
pub fn format_money(value: Money, unit: MinorUnit) -> String {
    let rounded = unit.round(value);
    let digits = format!("{:.*}", unit.scale() as usize, rounded.abs());

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(2.5), 0), dec!(3));
        assert_eq!(round_half_up(dec!(2.4999), 0), dec!(2));
        assert_eq!(round_half_up(dec!(-2.5), 0), dec!(-3));
        assert_eq!(round_half_up(dec!(1.005), 2), dec!(1.01));
    }

    #[test]
    fn test_minor_unit() {
        assert_eq!(MinorUnit::WHOLE.round(dec!(41666.5)), dec!(41667));
        assert_eq!(MinorUnit::CENTS.round(dec!(10.125)), dec!(10.13));
        assert_eq!(MinorUnit::default(), MinorUnit::WHOLE);
        assert_eq!(MinorUnit::new(29), Err(NumericError::InvalidInput));
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)).unwrap(), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(100000), dec!(20)).unwrap(), dec!(20000));
    }

    #[test]
    fn test_checked_div_by_zero() {
        assert_eq!(
            checked_div(Decimal::ONE, Decimal::ZERO),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_checked_overflow() {
        assert_eq!(
            checked_add(Decimal::MAX, Decimal::ONE),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            checked_sub(Decimal::MIN, Decimal::ONE),
            Err(NumericError::Underflow)
        );
        assert_eq!(
            checked_mul(Decimal::MAX, dec!(2)),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_checked_powu() {
        assert_eq!(checked_powu(dec!(1.01), 0).unwrap(), Decimal::ONE);
        assert_eq!(checked_powu(dec!(2), 10).unwrap(), dec!(1024));
    }

    #[test]
    fn test_checked_sum() {
        let total = checked_sum([dec!(1.5), dec!(2.5), dec!(-1)]).unwrap();
        assert_eq!(total, dec!(3));
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("1,500,000").unwrap(), dec!(1500000));
        assert_eq!(parse_money(" 3.75 ").unwrap(), dec!(3.75));
        assert_eq!(parse_money(""), Err(NumericError::InvalidInput));
        assert_eq!(parse_money("abc"), Err(NumericError::InvalidInput));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(0), MinorUnit::WHOLE), "0");
        assert_eq!(format_money(dec!(999), MinorUnit::WHOLE), "999");
        assert_eq!(format_money(dec!(1000), MinorUnit::WHOLE), "1,000");
        assert_eq!(format_money(dec!(450000000), MinorUnit::WHOLE), "450,000,000");
        assert_eq!(format_money(dec!(1234.5), MinorUnit::CENTS), "1,234.50");
    }
}
