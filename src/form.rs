//! Form boundary: raw string fields in, validated input records out.
//!
//! Field names follow the calculator pages (`principal`, `annual_rate`,
//! `months`, ...). Numbers may carry `,` thousands separators. A blank field
//! counts as missing.

use crate::domain::{
    DepositTiming, InterestMethod, LoanInput, RepaymentMethod, SavingsInput, SeveranceInput,
};
use crate::error::{CalcError, CalcResult};
use crate::formulas::{ActivityLevel, BmiInput, CalorieInput, DdayInput, DiscountInput, Gender};
use crate::interfaces::FromForm;
use crate::numeric::parse_money;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Submitted form fields keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a field
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Trimmed value, `None` when absent or blank
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, name: &str) -> CalcResult<&str> {
        self.raw(name)
            .ok_or_else(|| CalcError::invalid_input(name, "is required"))
    }

    pub fn decimal(&self, name: &str) -> CalcResult<Decimal> {
        let raw = self.required(name)?;
        parse_money(raw).map_err(|_| CalcError::invalid_input(name, "must be a number"))
    }

    pub fn optional_decimal(&self, name: &str) -> CalcResult<Option<Decimal>> {
        match self.raw(name) {
            Some(_) => self.decimal(name).map(Some),
            None => Ok(None),
        }
    }

    pub fn integer(&self, name: &str) -> CalcResult<u32> {
        let raw = without_grouping(self.required(name)?);
        raw.parse::<u32>()
            .map_err(|_| CalcError::invalid_input(name, "must be a whole number of at least 0"))
    }

    pub fn optional_integer(&self, name: &str) -> CalcResult<Option<u32>> {
        match self.raw(name) {
            Some(_) => self.integer(name).map(Some),
            None => Ok(None),
        }
    }

    pub fn float(&self, name: &str) -> CalcResult<f64> {
        let raw = without_grouping(self.required(name)?);
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(CalcError::invalid_input(name, "must be a number")),
        }
    }

    /// Enumerated field parsed with the type's `FromStr`
    pub fn choice<T>(&self, name: &str) -> CalcResult<T>
    where
        T: FromStr<Err = CalcError>,
    {
        let raw = self.required(name)?;
        T::from_str(raw).map_err(|err| relabel(err, name))
    }

    pub fn optional_choice<T>(&self, name: &str) -> CalcResult<Option<T>>
    where
        T: FromStr<Err = CalcError>,
    {
        match self.raw(name) {
            Some(_) => self.choice(name).map(Some),
            None => Ok(None),
        }
    }

    /// Parse the record `T` from these fields
    pub fn parse<T: FromForm>(&self) -> CalcResult<T> {
        T::from_form(self)
    }
}

impl<K, V> FromIterator<(K, V)> for FormFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn without_grouping(raw: &str) -> String {
    raw.chars().filter(|c| *c != ',').collect()
}

/// Report a parse failure against the form field that carried the value
fn relabel(err: CalcError, field: &str) -> CalcError {
    match err {
        CalcError::InvalidInput { message, .. } => CalcError::invalid_input(field, message),
        other => other,
    }
}

// ============================================================================
// Money calculators
// ============================================================================

impl FromForm for RepaymentMethod {
    /// `loan_type`, equal payment when absent
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        let Some(raw) = fields.raw("loan_type") else {
            return Ok(RepaymentMethod::EqualPayment);
        };
        let method = match raw {
            "equalPrincipalInterest" => RepaymentMethod::EqualPayment,
            "equalPrincipal" => RepaymentMethod::EqualPrincipal,
            "bulletRepayment" => RepaymentMethod::Bullet,
            other => RepaymentMethod::from_str(other).map_err(|err| relabel(err, "loan_type"))?,
        };
        Ok(method)
    }
}

impl FromForm for LoanInput {
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        let principal = fields.decimal("principal")?;
        let annual_rate = fields.decimal("annual_rate")?;
        let months = fields.integer("months")?;
        LoanInput::new(principal, annual_rate, months)
    }
}

impl FromForm for SavingsInput {
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        let deposit = fields.decimal("monthly_deposit")?;
        let months = fields.integer("months")?;
        let annual_rate = fields.decimal("annual_rate")?;
        let method: InterestMethod = fields.choice("interest_type")?;
        let timing: Option<DepositTiming> = fields.optional_choice("timing")?;

        let input = SavingsInput::new(deposit, months, annual_rate, method)?;
        Ok(input.with_timing(timing.unwrap_or_default()))
    }
}

impl FromForm for SeveranceInput {
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        let wage = fields.decimal("monthly_salary")?;
        let years = fields.integer("years")?;
        let months = fields.integer("months")?;
        SeveranceInput::new(wage, years, months)
    }
}

// ============================================================================
// Formula calculators
// ============================================================================

impl FromForm for BmiInput {
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        BmiInput::new(fields.float("height")?, fields.float("weight")?)
    }
}

impl FromForm for CalorieInput {
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        let gender: Gender = fields.choice("gender")?;
        let age_years = fields.integer("age")?;
        let height_cm = fields.float("height")?;
        let weight_kg = fields.float("weight")?;
        let activity = match fields.raw("activity_level") {
            Some(_) => ActivityLevel::from_factor(fields.float("activity_level")?)?,
            None => ActivityLevel::default(),
        };

        let input = CalorieInput {
            gender,
            age_years,
            height_cm,
            weight_kg,
            activity,
        };
        input.validate()?;
        Ok(input)
    }
}

impl FromForm for DiscountInput {
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        DiscountInput::new(
            fields.decimal("original_price")?,
            fields.decimal("discount1")?,
            fields.optional_decimal("discount2")?,
        )
    }
}

impl FromForm for DdayInput {
    /// `target_date` as a `datetime-local` value or a bare date (midnight)
    fn from_form(fields: &FormFields) -> CalcResult<Self> {
        let raw = fields.required("target_date")?;
        let parsed = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            });

        parsed
            .map(DdayInput::new)
            .ok_or_else(|| CalcError::invalid_input("target_date", "must be a date like 2025-01-01"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn field_of(err: CalcError) -> String {
        match err {
            CalcError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let fields = FormFields::new().with("principal", "   ");
        assert_eq!(fields.raw("principal"), None);
        assert_eq!(field_of(fields.decimal("principal").unwrap_err()), "principal");
        assert_eq!(fields.optional_decimal("principal").unwrap(), None);
    }

    #[test]
    fn test_grouped_numbers() {
        let fields = FormFields::new()
            .with("principal", "300,000,000")
            .with("months", "1,200")
            .with("height", "1,175.5");
        assert_eq!(fields.decimal("principal").unwrap(), dec!(300_000_000));
        assert_eq!(fields.integer("months").unwrap(), 1200);
        assert!((fields.float("height").unwrap() - 1175.5).abs() < 1e-12);
    }

    #[test]
    fn test_loan_from_form() {
        let fields: FormFields = [
            ("loan_type", "equalPrincipal"),
            ("principal", "100,000,000"),
            ("annual_rate", "4.5"),
            ("months", "360"),
        ]
        .into_iter()
        .collect();

        let input: LoanInput = fields.parse().unwrap();
        assert_eq!(input.principal, dec!(100_000_000));
        assert_eq!(input.annual_rate_percent, dec!(4.5));
        assert_eq!(input.term_months, 360);
        assert_eq!(fields.parse::<RepaymentMethod>().unwrap(), RepaymentMethod::EqualPrincipal);
    }

    #[test]
    fn test_loan_rejects_partial_form() {
        let fields = FormFields::new()
            .with("principal", "1000000")
            .with("annual_rate", "abc")
            .with("months", "12");
        let err = LoanInput::from_form(&fields).unwrap_err();
        assert_eq!(field_of(err), "annual_rate");

        let fields = FormFields::new()
            .with("principal", "1000000")
            .with("annual_rate", "5");
        assert_eq!(field_of(LoanInput::from_form(&fields).unwrap_err()), "months");

        let fields = FormFields::new()
            .with("principal", "1000000")
            .with("annual_rate", "5")
            .with("months", "-3");
        assert_eq!(field_of(LoanInput::from_form(&fields).unwrap_err()), "months");
    }

    #[test]
    fn test_loan_term_beyond_cap() {
        let fields = FormFields::new()
            .with("principal", "1000000")
            .with("annual_rate", "20")
            .with("months", "4294967295");
        let err = LoanInput::from_form(&fields).unwrap_err();
        assert_eq!(field_of(err), "term_months");

        let fields = fields.with("months", "1200");
        assert_eq!(LoanInput::from_form(&fields).unwrap().term_months, 1200);
    }

    #[test]
    fn test_repayment_method_names() {
        let parse = |v: &str| FormFields::new().with("loan_type", v).parse::<RepaymentMethod>();
        assert_eq!(parse("bulletRepayment").unwrap(), RepaymentMethod::Bullet);
        assert_eq!(parse("equal-payment").unwrap(), RepaymentMethod::EqualPayment);
        assert_eq!(field_of(parse("balloon").unwrap_err()), "loan_type");
        assert_eq!(
            FormFields::new().parse::<RepaymentMethod>().unwrap(),
            RepaymentMethod::EqualPayment
        );
    }

    #[test]
    fn test_savings_from_form() {
        let fields = FormFields::new()
            .with("monthly_deposit", "100,000")
            .with("months", "12")
            .with("annual_rate", "5")
            .with("interest_type", "compound")
            .with("timing", "end");
        let input: SavingsInput = fields.parse().unwrap();
        assert_eq!(input.method, InterestMethod::Compound);
        assert_eq!(input.timing, DepositTiming::EndOfPeriod);

        let fields = fields.with("interest_type", "daily");
        assert_eq!(
            field_of(SavingsInput::from_form(&fields).unwrap_err()),
            "interest_type"
        );
    }

    #[test]
    fn test_severance_requires_all_fields() {
        let fields = FormFields::new()
            .with("monthly_salary", "3,000,000")
            .with("years", "5");
        assert_eq!(field_of(SeveranceInput::from_form(&fields).unwrap_err()), "months");

        let input: SeveranceInput = fields.with("months", "0").parse().unwrap();
        assert_eq!(input.service_years, 5);
    }

    #[test]
    fn test_health_forms() {
        let bmi: BmiInput = FormFields::new()
            .with("height", "170")
            .with("weight", "65")
            .parse()
            .unwrap();
        assert_eq!(bmi.height_cm, 170.0);

        let fields = FormFields::new()
            .with("gender", "female")
            .with("age", "30")
            .with("height", "165")
            .with("weight", "55");
        let calorie: CalorieInput = fields.parse().unwrap();
        assert_eq!(calorie.activity, ActivityLevel::Moderate);

        let calorie: CalorieInput = fields.clone().with("activity_level", "1.725").parse().unwrap();
        assert_eq!(calorie.activity, ActivityLevel::Active);

        let err = fields.with("activity_level", "9").parse::<CalorieInput>().unwrap_err();
        assert_eq!(field_of(err), "activity_level");
    }

    #[test]
    fn test_discount_form_second_optional() {
        let fields = FormFields::new()
            .with("original_price", "50,000")
            .with("discount1", "10")
            .with("discount2", "");
        let input: DiscountInput = fields.parse().unwrap();
        assert_eq!(input.second_percent, None);

        let err = FormFields::new()
            .with("original_price", "50,000")
            .parse::<DiscountInput>()
            .unwrap_err();
        assert_eq!(field_of(err), "discount1");
    }

    #[test]
    fn test_dday_formats() {
        for raw in ["2025-01-01T09:30", "2025-01-01 09:30:00"] {
            let input: DdayInput = FormFields::new().with("target_date", raw).parse().unwrap();
            assert_eq!(input.target.to_string(), "2025-01-01 09:30:00");
        }
        let input: DdayInput = FormFields::new()
            .with("target_date", "2025-01-01")
            .parse()
            .unwrap();
        assert_eq!(input.target.to_string(), "2025-01-01 00:00:00");

        let err = FormFields::new()
            .with("target_date", "next friday")
            .parse::<DdayInput>()
            .unwrap_err();
        assert_eq!(field_of(err), "target_date");
    }
}
