// ============================================================================
// Daily Calorie Needs
// Revised Harris-Benedict basal metabolic rate times an activity factor
// ============================================================================

use crate::error::{CalcError, CalcResult};
use std::str::FromStr;

use super::ensure_positive_finite;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "남성" => Ok(Gender::Male),
            "female" | "f" | "여성" => Ok(Gender::Female),
            other => Err(CalcError::invalid_input(
                "gender",
                format!("unknown gender `{other}`"),
            )),
        }
    }
}

/// Physical activity level (PAL)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActivityLevel {
    /// Mostly sitting, 1.2
    Sedentary,
    /// Exercise 1-3 days a week, 1.375
    Light,
    /// Exercise 3-5 days a week, 1.55
    Moderate,
    /// Exercise 6-7 days a week, 1.725
    Active,
    /// Physical job or training twice a day, 1.9
    VeryActive,
    /// Any other factor
    Custom(f64),
}

impl ActivityLevel {
    pub const PRESETS: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    const MIN_FACTOR: f64 = 1.0;
    const MAX_FACTOR: f64 = 2.5;

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
            ActivityLevel::Custom(factor) => *factor,
        }
    }

    /// Map a raw factor to its preset, or a validated custom level.
    pub fn from_factor(factor: f64) -> CalcResult<Self> {
        if !factor.is_finite() || !(Self::MIN_FACTOR..=Self::MAX_FACTOR).contains(&factor) {
            return Err(CalcError::invalid_input(
                "activity_level",
                format!("factor must be between {} and {}", Self::MIN_FACTOR, Self::MAX_FACTOR),
            ));
        }
        Ok(Self::PRESETS
            .into_iter()
            .find(|level| (level.factor() - factor).abs() < 1e-9)
            .unwrap_or(ActivityLevel::Custom(factor)))
    }
}

impl Default for ActivityLevel {
    fn default() -> Self {
        ActivityLevel::Moderate
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalorieInput {
    pub gender: Gender,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
}

impl CalorieInput {
    pub fn validate(&self) -> CalcResult<()> {
        if self.age_years > 150 {
            return Err(CalcError::invalid_input("age", "must be 150 or less"));
        }
        ensure_positive_finite("height_cm", self.height_cm)?;
        ensure_positive_finite("weight_kg", self.weight_kg)?;
        ActivityLevel::from_factor(self.activity.factor()).map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalorieResult {
    /// Basal metabolic rate, kcal/day
    pub bmr: f64,
    /// Total daily energy expenditure, kcal/day
    pub tdee: f64,
    /// Maintenance intake, kcal/day
    pub recommended_calories: f64,
}

pub fn basal_metabolic_rate(gender: Gender, age_years: u32, height_cm: f64, weight_kg: f64) -> f64 {
    let age = f64::from(age_years);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

pub fn calculate_calories(input: &CalorieInput) -> CalcResult<CalorieResult> {
    input.validate()?;
    let bmr = basal_metabolic_rate(input.gender, input.age_years, input.height_cm, input.weight_kg);
    let tdee = bmr * input.activity.factor();
    Ok(CalorieResult {
        bmr,
        tdee,
        recommended_calories: tdee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(gender: Gender, activity: ActivityLevel) -> CalorieInput {
        CalorieInput {
            gender,
            age_years: 30,
            height_cm: 175.0,
            weight_kg: 70.0,
            activity,
        }
    }

    #[test]
    fn test_male_bmr() {
        let result = calculate_calories(&input(Gender::Male, ActivityLevel::Sedentary)).unwrap();
        // 88.362 + 937.79 + 839.825 - 170.31
        assert!((result.bmr - 1695.667).abs() < 1e-6);
        assert!((result.tdee - 1695.667 * 1.2).abs() < 1e-6);
        assert_eq!(result.recommended_calories, result.tdee);
    }

    #[test]
    fn test_female_bmr() {
        let result = calculate_calories(&input(Gender::Female, ActivityLevel::Moderate)).unwrap();
        // 447.593 + 647.29 + 542.15 - 129.9
        assert!((result.bmr - 1507.133).abs() < 1e-6);
    }

    #[test]
    fn test_activity_from_factor() {
        assert_eq!(ActivityLevel::from_factor(1.55).unwrap(), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_factor(1.6).unwrap(), ActivityLevel::Custom(1.6));
        assert!(ActivityLevel::from_factor(3.0).is_err());
        assert!(ActivityLevel::from_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("여성".parse::<Gender>().unwrap(), Gender::Female);
        assert!("x".parse::<Gender>().is_err());
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut bad = input(Gender::Male, ActivityLevel::Custom(0.5));
        assert!(calculate_calories(&bad).is_err());
        bad.activity = ActivityLevel::Light;
        bad.weight_kg = 0.0;
        assert!(calculate_calories(&bad).is_err());
    }
}
