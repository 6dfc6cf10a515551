// ============================================================================
// Unit Conversion
// Linear units scale through a per-category base unit; temperature goes
// through Celsius with the Fahrenheit and Kelvin offset formulas.
// ============================================================================

use crate::error::{CalcError, CalcResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitCategory {
    Length,
    Weight,
    Volume,
    Temperature,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 4] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Volume,
        UnitCategory::Temperature,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Volume => "volume",
            UnitCategory::Temperature => "temperature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UnitCategory::Length => "길이",
            UnitCategory::Weight => "무게",
            UnitCategory::Volume => "부피",
            UnitCategory::Temperature => "온도",
        }
    }

    /// Code of the intermediate unit every conversion passes through
    pub fn base_unit(&self) -> &'static str {
        match self {
            UnitCategory::Length => "m",
            UnitCategory::Weight => "kg",
            UnitCategory::Volume => "l",
            UnitCategory::Temperature => "c",
        }
    }

    pub fn units(&self) -> &'static [Unit] {
        match self {
            UnitCategory::Length => &LENGTH_UNITS,
            UnitCategory::Weight => &WEIGHT_UNITS,
            UnitCategory::Volume => &VOLUME_UNITS,
            UnitCategory::Temperature => &TEMPERATURE_UNITS,
        }
    }

    /// Unit by code within this category
    pub fn find(&self, code: &str) -> CalcResult<&'static Unit> {
        let code = code.trim();
        self.units()
            .iter()
            .find(|u| u.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| CalcError::UnknownUnit {
                category: self.name(),
                code: code.to_string(),
            })
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a unit maps onto its category's base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// base = value × factor
    Factor(f64),
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl Scale {
    fn to_base(self, value: f64) -> f64 {
        match self {
            Scale::Factor(factor) => value * factor,
            Scale::Celsius => value,
            Scale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Scale::Kelvin => value - 273.15,
        }
    }

    fn from_base(self, base: f64) -> f64 {
        match self {
            Scale::Factor(factor) => base / factor,
            Scale::Celsius => base,
            Scale::Fahrenheit => base * 9.0 / 5.0 + 32.0,
            Scale::Kelvin => base + 273.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub code: &'static str,
    /// Korean display name
    pub name: &'static str,
    pub category: UnitCategory,
    pub scale: Scale,
}

impl Unit {
    pub fn to_base(&self, value: f64) -> f64 {
        self.scale.to_base(value)
    }

    pub fn from_base(&self, base: f64) -> f64 {
        self.scale.from_base(base)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

const fn linear(code: &'static str, name: &'static str, category: UnitCategory, factor: f64) -> Unit {
    Unit {
        code,
        name,
        category,
        scale: Scale::Factor(factor),
    }
}

pub static LENGTH_UNITS: [Unit; 8] = [
    linear("mm", "밀리미터", UnitCategory::Length, 0.001),
    linear("cm", "센티미터", UnitCategory::Length, 0.01),
    linear("m", "미터", UnitCategory::Length, 1.0),
    linear("km", "킬로미터", UnitCategory::Length, 1000.0),
    linear("inch", "인치", UnitCategory::Length, 0.0254),
    linear("ft", "피트", UnitCategory::Length, 0.3048),
    linear("yard", "야드", UnitCategory::Length, 0.9144),
    linear("mile", "마일", UnitCategory::Length, 1609.344),
];

pub static WEIGHT_UNITS: [Unit; 8] = [
    linear("mg", "밀리그램", UnitCategory::Weight, 0.000_001),
    linear("g", "그램", UnitCategory::Weight, 0.001),
    linear("kg", "킬로그램", UnitCategory::Weight, 1.0),
    linear("t", "톤", UnitCategory::Weight, 1000.0),
    linear("oz", "온스", UnitCategory::Weight, 0.0283495),
    linear("lb", "파운드", UnitCategory::Weight, 0.453592),
    linear("don", "돈", UnitCategory::Weight, 0.00375),
    linear("geun", "근", UnitCategory::Weight, 0.6),
];

pub static VOLUME_UNITS: [Unit; 8] = [
    linear("ml", "밀리리터", UnitCategory::Volume, 0.001),
    linear("l", "리터", UnitCategory::Volume, 1.0),
    linear("cc", "cc", UnitCategory::Volume, 0.001),
    linear("cup", "컵", UnitCategory::Volume, 0.2365882365),
    linear("tbsp", "테이블스푼", UnitCategory::Volume, 0.0147868),
    linear("tsp", "티스푼", UnitCategory::Volume, 0.00492892),
    linear("gallon", "갤런", UnitCategory::Volume, 3.78541),
    linear("hop", "홉", UnitCategory::Volume, 0.18039),
];

pub static TEMPERATURE_UNITS: [Unit; 3] = [
    Unit {
        code: "c",
        name: "섭씨",
        category: UnitCategory::Temperature,
        scale: Scale::Celsius,
    },
    Unit {
        code: "f",
        name: "화씨",
        category: UnitCategory::Temperature,
        scale: Scale::Fahrenheit,
    },
    Unit {
        code: "k",
        name: "켈빈",
        category: UnitCategory::Temperature,
        scale: Scale::Kelvin,
    },
];

/// Convert `value` from one unit to another of the same category.
///
/// # Errors
/// `UnitMismatch` across categories, `InvalidInput` for NaN or infinity.
pub fn convert(value: f64, from: &Unit, to: &Unit) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("value", "must be a finite number"));
    }
    if from.category != to.category {
        return Err(CalcError::UnitMismatch {
            from: from.category.name(),
            to: to.category.name(),
        });
    }
    Ok(to.from_base(from.to_base(value)))
}

/// Convert between unit codes of one category, e.g. `("m", "ft")`
pub fn convert_codes(category: UnitCategory, value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let from = category.find(from)?;
    let to = category.find(to)?;
    convert(value, from, to)
}

/// Display rule for converted values: scientific notation with six
/// fractional digits for very small or very large magnitudes, otherwise up to
/// six decimals with trailing zeros trimmed.
///
/// ```
/// use life_calc::formulas::format_converted;
///
/// assert_eq!(format_converted(3.280839895013123), "3.28084");
/// assert_eq!(format_converted(1_000_000.0), "1.000000e6");
/// assert_eq!(format_converted(0.0), "0");
/// ```
pub fn format_converted(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude < 1e-4 || magnitude >= 1e6 {
        return format!("{value:.6e}");
    }
    let fixed = format!("{value:.6}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
