/// quick start - minimal example to get started
use loan_amortization_rs::{Loan, LoanType, Money, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // a 20 year home loan of 5,00,000 at 8.5%
    let mut loan = Loan::builder()
        .name("Home loan")
        .loan_type(LoanType::HomeLoan)
        .amount(Money::from_major(500_000))
        .rate_percent(dec!(8.5))
        .tenure_months(240)
        .build_with_time(&time)?;

    println!("EMI: {}", loan.config.present(loan.emi()?));

    // print current state
    println!("{}", loan.json(&time));

    Ok(())
}
