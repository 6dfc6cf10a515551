// ============================================================================
// Body Mass Index
// ============================================================================

use crate::error::CalcResult;
use std::fmt;

use super::ensure_positive_finite;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BmiInput {
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl BmiInput {
    pub fn new(height_cm: f64, weight_kg: f64) -> CalcResult<Self> {
        let input = Self {
            height_cm,
            weight_kg,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive_finite("height_cm", self.height_cm)?;
        ensure_positive_finite("weight_kg", self.weight_kg)
    }
}

/// Weight classes on the Asia-Pacific cut-offs (23 / 25 / 30)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BmiCategory {
    /// below 18.5
    Underweight,
    /// 18.5 up to 23
    Normal,
    /// 23 up to 25
    Overweight,
    /// 25 up to 30
    Obese,
    /// 30 and above
    SeverelyObese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 23.0 {
            BmiCategory::Normal
        } else if bmi < 25.0 {
            BmiCategory::Overweight
        } else if bmi < 30.0 {
            BmiCategory::Obese
        } else {
            BmiCategory::SeverelyObese
        }
    }

    /// Korean label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "저체중",
            BmiCategory::Normal => "정상",
            BmiCategory::Overweight => "과체중",
            BmiCategory::Obese => "비만",
            BmiCategory::SeverelyObese => "고도비만",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

/// `weight / (height in metres)²`
pub fn calculate_bmi(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let height_m = input.height_cm / 100.0;
    let bmi = input.weight_kg / (height_m * height_m);
    Ok(BmiResult {
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}
