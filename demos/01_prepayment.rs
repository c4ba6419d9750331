/// compare prepayment strategies on a loan two years in
use chrono::{TimeZone, Utc};
use loan_amortization_rs::serialization::PrepaymentView;
use loan_amortization_rs::{Loan, Money, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 4, 20, 9, 0, 0).unwrap()));

    let mut loan = Loan::builder()
        .name("Home loan")
        .amount(Money::from_major(1_000_000))
        .rate_percent(dec!(9))
        .tenure_months(120)
        .start_date(chrono::NaiveDate::from_ymd_opt(2022, 4, 5).unwrap())
        .paid_emis(24)
        .build_with_time(&time)?;

    let prepayment = Money::from_major(100_000);
    let comparison = loan.compare_prepayment(prepayment, &time)?;

    println!("reduce tenure:");
    println!("{}", PrepaymentView::from_result(&comparison.reduce_tenure, &loan.config).to_json_pretty()?);
    println!("reduce emi:");
    println!("{}", PrepaymentView::from_result(&comparison.reduce_emi, &loan.config).to_json_pretty()?);
    println!(
        "recommended: {:?} (saves {} more)",
        comparison.recommended(),
        loan.config.present(comparison.savings_difference())
    );

    // commit the recommended strategy and look at the revised loan
    loan.apply_prepayment(prepayment, comparison.recommended(), &time)?;
    println!("{}", loan.json(&time));

    for event in loan.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}
