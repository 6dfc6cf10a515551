// ============================================================================
// Basic Usage Example
// ============================================================================

use chrono::{Duration, Local, Utc};
use life_calc::formulas::{arrival_time, format_converted, time_difference, time_in_city};
use life_calc::prelude::*;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    life_calc::utils::init_logging();

    println!("=== Life Calculator Example ===\n");

    let calculator = CalculatorBuilder::new()
        .event_handler(Arc::new(LoggingEventHandler))
        .build()
        .unwrap();
    let won = |m: Money| format_money(m, MinorUnit::WHOLE);

    // Loan: 300,000,000 won over 30 years at 4.35%
    println!("=== Loan ===");
    let loan = LoanInput::new(dec!(300_000_000), dec!(4.35), 360).unwrap();
    for method in RepaymentMethod::ALL {
        let result = calculator.loan(method, &loan).unwrap();
        println!(
            "{:<8} first payment {:>12}  total interest {:>14}  last-period adjustment {}",
            method.label(),
            won(result.schedule[0].payment),
            won(result.total_interest),
            result.final_adjustment,
        );
    }

    let schedule = calculator.loan(RepaymentMethod::EqualPayment, &loan).unwrap();
    println!("\nFirst three periods (equal payment):");
    for row in schedule.schedule.iter().take(3) {
        println!(
            "  #{:<3} principal {:>10}  interest {:>10}  balance {:>14}",
            row.period,
            won(row.principal_portion),
            won(row.interest_portion),
            won(row.remaining_balance),
        );
    }

    // Savings: 500,000 a month for 3 years at 3.5%
    println!("\n=== Savings ===");
    for method in [InterestMethod::Simple, InterestMethod::Compound] {
        let input = SavingsInput::new(dec!(500_000), 36, dec!(3.5), method).unwrap();
        let result = calculator.savings(&input).unwrap();
        println!(
            "{}: deposited {}  interest {}  balance {}",
            method.label(),
            won(result.total_deposited),
            won(result.total_interest),
            won(result.final_balance),
        );
    }

    // Severance from a submitted form
    println!("\n=== Severance ===");
    let fields = FormFields::new()
        .with("monthly_salary", "3,500,000")
        .with("years", "7")
        .with("months", "4");
    let severance = calculator.severance_from_form(&fields).unwrap();
    println!("Service days:      {}", severance.total_service_days);
    println!("Gross severance:   {}", won(severance.gross_severance));
    println!("Income tax:        {}", won(severance.national_income_tax));
    println!("Local income tax:  {}", won(severance.local_income_tax));
    println!("Net amount:        {}", won(severance.net_amount));

    // Health
    println!("\n=== Health ===");
    let bmi = calculator.bmi(&BmiInput::new(172.0, 68.0).unwrap()).unwrap();
    println!("BMI {:.1} ({})", bmi.bmi, bmi.category);
    let calories = calculator
        .calories(&CalorieInput {
            gender: Gender::Female,
            age_years: 34,
            height_cm: 163.0,
            weight_kg: 55.0,
            activity: ActivityLevel::Light,
        })
        .unwrap();
    println!("BMR {:.0} kcal, TDEE {:.0} kcal", calories.bmr, calories.tdee);

    // Shopping
    println!("\n=== Discount ===");
    let discount = DiscountInput::new(dec!(89_000), dec!(30), Some(dec!(10))).unwrap();
    let result = calculator.discount(&discount).unwrap();
    for step in &result.steps {
        println!("  {}: -{} -> {}", step.description, won(step.discount), won(step.price_after));
    }
    println!("Total discount rate: {}%", result.total_discount_rate.round_dp(2));

    // Dates and clocks
    println!("\n=== D-Day ===");
    let target = (Local::now() + Duration::days(100)).naive_local();
    let dday = calculator.dday(&DdayInput::new(target), &Local::now()).unwrap();
    println!("{dday}");

    println!("\n=== World Clock ===");
    let now = Utc::now();
    let seoul = City::seoul();
    for name in ["뉴욕", "런던", "델리", "시드니"] {
        let city = City::find(name).unwrap();
        println!(
            "{:<8} {}  {}",
            city.name,
            time_in_city(now, city).unwrap().format("%Y-%m-%d %H:%M"),
            time_difference(seoul, city).describe(seoul.name),
        );
    }
    let paris = City::find("파리").unwrap();
    let arrival = arrival_time(now, 13, 55, paris).unwrap();
    println!("Leaving now, a 13h55m flight lands in Paris at {}", arrival.format("%H:%M"));

    // Units
    println!("\n=== Units ===");
    for (category, value, from, to) in [
        (UnitCategory::Length, 1.0, "mile", "km"),
        (UnitCategory::Weight, 1.0, "geun", "g"),
        (UnitCategory::Volume, 2.0, "cup", "ml"),
        (UnitCategory::Temperature, 98.6, "f", "c"),
    ] {
        let converted = calculator.convert_units(category, value, from, to).unwrap();
        println!("{value} {from} = {} {to}", format_converted(converted));
    }
}
