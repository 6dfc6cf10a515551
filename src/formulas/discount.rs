// ============================================================================
// Discount Stacking
// Successive percentage discounts, each on the already-reduced price
// ============================================================================

use crate::error::{CalcError, CalcResult};
use crate::numeric::{checked_div, checked_mul, checked_sub, percent_of, MinorUnit, Money, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscountInput {
    pub original_price: Money,
    /// First discount in percent
    pub first_percent: Rate,
    /// Optional second discount in percent, applied after the first
    pub second_percent: Option<Rate>,
}

impl DiscountInput {
    pub fn new(original_price: Money, first_percent: Rate, second_percent: Option<Rate>) -> CalcResult<Self> {
        let input = Self {
            original_price,
            first_percent,
            second_percent,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.original_price < Decimal::ZERO {
            return Err(CalcError::invalid_input("original_price", "must not be negative"));
        }
        ensure_percent("discount1", self.first_percent)?;
        if let Some(second) = self.second_percent {
            ensure_percent("discount2", second)?;
        }
        Ok(())
    }
}

fn ensure_percent(field: &str, value: Rate) -> CalcResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(CalcError::invalid_input(field, "must be between 0 and 100"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscountStep {
    /// 1-based step number
    pub step: u8,
    pub percent: Rate,
    /// Amount taken off at this step
    pub discount: Money,
    /// Price after this step
    pub price_after: Money,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiscountResult {
    pub final_price: Money,
    /// original_price − final_price
    pub total_discount: Money,
    /// Effective combined discount in percent
    pub total_discount_rate: Rate,
    pub steps: SmallVec<[DiscountStep; 2]>,
}

impl DiscountResult {
    /// Price after the first discount
    pub fn after_first(&self) -> Option<Money> {
        self.steps.first().map(|s| s.price_after)
    }
}

/// Apply the discounts in order.
///
/// A missing or zero second discount adds no step. Each discount amount is
/// rounded half-up to `unit`; a zero original price reports a 0% total rate.
pub fn calculate_discount(input: &DiscountInput, unit: MinorUnit) -> CalcResult<DiscountResult> {
    input.validate()?;

    let mut steps: SmallVec<[DiscountStep; 2]> = SmallVec::new();
    let mut price = input.original_price;

    let stages = [
        Some(input.first_percent),
        input.second_percent.filter(|p| !p.is_zero()),
    ];
    for (index, percent) in stages.into_iter().enumerate() {
        let Some(percent) = percent else { continue };
        let discount = unit.round(percent_of(price, percent)?);
        price = checked_sub(price, discount)?;

        let description = if index == 0 {
            format!("{}% 할인", percent.normalize())
        } else {
            format!("{}% 추가 할인", percent.normalize())
        };
        steps.push(DiscountStep {
            step: index as u8 + 1,
            percent,
            discount,
            price_after: price,
            description,
        });
    }

    let total_discount = checked_sub(input.original_price, price)?;
    let total_discount_rate = if input.original_price.is_zero() {
        Decimal::ZERO
    } else {
        checked_mul(checked_div(total_discount, input.original_price)?, dec!(100))?
    };

    Ok(DiscountResult {
        final_price: price,
        total_discount,
        total_discount_rate,
        steps,
    })
}
