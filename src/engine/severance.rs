// ============================================================================
// Severance Pay and Retirement Income Tax
// ============================================================================

use crate::domain::{SeveranceInput, SeveranceResult, SeveranceRules};
use crate::error::{CalcError, CalcResult};
use crate::numeric::{checked_div, checked_mul, checked_sub, MinorUnit, Money};
use rust_decimal::Decimal;

/// Service days counted as `years × days_per_year + months × days_per_month`.
///
/// This is the statutory shortcut (365 per year, 30 per month), not a
/// calendar day count between two dates.
pub fn service_days(input: &SeveranceInput, rules: &SeveranceRules) -> CalcResult<u32> {
    let years = input.service_years.checked_mul(rules.days_per_year);
    let months = input.service_months.checked_mul(rules.days_per_month);
    years
        .zip(months)
        .and_then(|(y, m)| y.checked_add(m))
        .ok_or_else(|| CalcError::invalid_input("service_years", "service period is too long"))
}

/// Service-year deduction for a (possibly fractional) number of years.
pub fn service_year_deduction(years: Decimal, rules: &SeveranceRules) -> CalcResult<Money> {
    Ok(rules.deduction.evaluate(years)?)
}

/// Progressive income tax on `tax_base`. A non-positive base owes nothing.
pub fn retirement_income_tax(tax_base: Money, rules: &SeveranceRules) -> CalcResult<Money> {
    Ok(rules.income_tax.evaluate(tax_base)?)
}

/// Compute severance pay, the taxes withheld from it and the net amount.
///
/// ```text
/// gross      = wage × wage_days × service_days / days_per_year
/// deduction  = tiered(service_days / days_per_year)
/// tax_base   = max(gross − deduction, 0)
/// income tax = progressive(tax_base)
/// local tax  = income tax × local_tax_rate
/// net        = gross − income tax − local tax
/// ```
///
/// Gross, deduction and both taxes are rounded half-up to `unit` before
/// they are combined, so `net` reconciles exactly with the reported parts.
pub fn calculate_severance(
    input: &SeveranceInput,
    rules: &SeveranceRules,
    unit: MinorUnit,
) -> CalcResult<SeveranceResult> {
    input.validate()?;
    rules.validate()?;

    let total_service_days = service_days(input, rules)?;
    let days = Decimal::from(total_service_days);
    let days_per_year = Decimal::from(rules.days_per_year);

    let gross_severance = unit.round(checked_div(
        checked_mul(
            checked_mul(input.monthly_wage, Decimal::from(rules.wage_days))?,
            days,
        )?,
        days_per_year,
    )?);

    let service_years = checked_div(days, days_per_year)?;
    let deduction = unit.round(service_year_deduction(service_years, rules)?);
    let tax_base = checked_sub(gross_severance, deduction)?.max(Decimal::ZERO);

    let national_income_tax = unit.round(retirement_income_tax(tax_base, rules)?);
    let local_income_tax = unit.round(checked_mul(national_income_tax, rules.local_tax_rate)?);
    let net_amount = checked_sub(
        checked_sub(gross_severance, national_income_tax)?,
        local_income_tax,
    )?;

    tracing::debug!(
        total_service_days,
        gross = %gross_severance,
        tax_base = %tax_base,
        net = %net_amount,
        "severance computed"
    );

    Ok(SeveranceResult {
        total_service_days,
        gross_severance,
        deduction,
        tax_base,
        national_income_tax,
        local_income_tax,
        net_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn severance(wage: Decimal, years: u32, months: u32) -> SeveranceResult {
        let input = SeveranceInput::new(wage, years, months).unwrap();
        calculate_severance(&input, &SeveranceRules::korea(), MinorUnit::WHOLE).unwrap()
    }

    #[test]
    fn test_five_years_exactly() {
        let result = severance(dec!(3_000_000), 5, 0);

        assert_eq!(result.total_service_days, 1825);
        // 3,000,000 × 30 × (1825 / 365)
        assert_eq!(result.gross_severance, dec!(450_000_000));
        // Five years sits on the boundary and stays in the 300k/yr tier
        assert_eq!(result.deduction, dec!(1_500_000));
        assert_eq!(result.tax_base, dec!(448_500_000));
        // 37.6M + (448.5M − 150M) × 38%
        assert_eq!(result.national_income_tax, dec!(151_030_000));
        assert_eq!(result.local_income_tax, dec!(15_103_000));
        assert_eq!(result.net_amount, dec!(283_867_000));
    }

    #[test]
    fn test_service_days_approximation() {
        let input = SeveranceInput::new(dec!(1), 2, 7).unwrap();
        assert_eq!(service_days(&input, &SeveranceRules::korea()).unwrap(), 2 * 365 + 7 * 30);
    }

    #[test]
    fn test_deduction_tiers() {
        let rules = SeveranceRules::korea();
        assert_eq!(service_year_deduction(dec!(3), &rules).unwrap(), dec!(900_000));
        assert_eq!(service_year_deduction(dec!(10), &rules).unwrap(), dec!(4_000_000));
        assert_eq!(service_year_deduction(dec!(15), &rules).unwrap(), dec!(7_500_000));
        assert_eq!(service_year_deduction(dec!(25), &rules).unwrap(), dec!(16_000_000));
    }

    #[test]
    fn test_tax_brackets() {
        let rules = SeveranceRules::korea();
        assert_eq!(retirement_income_tax(dec!(10_000_000), &rules).unwrap(), dec!(600_000));
        assert_eq!(retirement_income_tax(dec!(20_000_000), &rules).unwrap(), dec!(1_920_000));
        assert_eq!(retirement_income_tax(dec!(50_000_000), &rules).unwrap(), dec!(6_780_000));
        assert_eq!(retirement_income_tax(dec!(100_000_000), &rules).unwrap(), dec!(20_100_000));
    }

    #[test]
    fn test_zero_tax_base_owes_nothing() {
        // Tiny wage: gross is swallowed by the deduction
        let result = severance(dec!(10_000), 3, 0);
        assert_eq!(result.gross_severance, dec!(900_000));
        assert_eq!(result.deduction, dec!(900_000));
        assert_eq!(result.tax_base, Decimal::ZERO);
        assert_eq!(result.national_income_tax, Decimal::ZERO);
        assert_eq!(result.net_amount, result.gross_severance);
    }

    #[test]
    fn test_no_service() {
        let result = severance(dec!(2_500_000), 0, 0);
        assert_eq!(result.total_service_days, 0);
        assert_eq!(result.gross_severance, Decimal::ZERO);
        assert_eq!(result.net_amount, Decimal::ZERO);
    }

    #[test]
    fn test_partial_year_rounds_to_won() {
        let result = severance(dec!(2_000_000), 1, 5);
        // 2,000,000 × 30 × 515 / 365 = 84,657,534.2...
        assert_eq!(result.total_service_days, 515);
        assert_eq!(result.gross_severance, dec!(84_657_534));
        assert_eq!(
            result.net_amount,
            result.gross_severance - result.total_tax()
        );
    }
}
