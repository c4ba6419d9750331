/// value a fixed deposit today and at maturity
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_amortization_rs::{
    calculate_maturity_amount, CompoundingFrequency, DepositView, EngineConfig, FdTerms,
    FixedDeposit, Money, Rate, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    let amount = calculate_maturity_amount(Money::from_major(100_000), Rate::from_percentage(7), start, end)?;
    println!("maturity amount: {}", amount.round_dp(2));

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap()));
    let control = time.test_control().unwrap();
    let config = EngineConfig::default();

    let mut deposit = FixedDeposit::new(
        "1 year FD, quarterly",
        FdTerms {
            principal: Money::from_major(100_000),
            annual_rate: Rate::from_percentage(7),
            start_date: start,
            end_date: end,
            compounding: CompoundingFrequency::Quarterly,
        },
    )?;

    let valuation = deposit.valuation(&time)?;
    println!("{}", DepositView::new(&deposit, &valuation, &config).to_json_pretty()?);

    // jump past maturity
    control.advance(Duration::days(200));
    let valuation = deposit.valuation(&time)?;
    println!("{}", DepositView::new(&deposit, &valuation, &config).to_json_pretty()?);

    Ok(())
}
