// ============================================================================
// Formula Calculators Module
// Single-step health, shopping, date and unit formulas
// ============================================================================

pub mod bmi;
pub mod calorie;
pub mod dday;
pub mod discount;
pub mod timezone;
pub mod units;

pub use bmi::{calculate_bmi, BmiCategory, BmiInput, BmiResult};
pub use calorie::{
    basal_metabolic_rate, calculate_calories, ActivityLevel, CalorieInput, CalorieResult, Gender,
};
pub use dday::{calculate_dday, dday_between, dday_from_now, DdayInput, DdayResult};
pub use discount::{calculate_discount, DiscountInput, DiscountResult, DiscountStep};
pub use timezone::{
    arrival_time, time_at_offset, time_difference, time_in_city, City, Region, TimeDifference,
    UtcOffset, CITIES,
};
pub use units::{convert, convert_codes, format_converted, Scale, Unit, UnitCategory};

use crate::error::{CalcError, CalcResult};

pub(crate) fn ensure_positive_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, "must be greater than zero"));
    }
    Ok(())
}
