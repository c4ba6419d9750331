use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::events::{Event, EventStore};
use crate::payments::{
    compare_strategies, generate_schedule, simulate_prepayment, AmortizationSchedule, LoanTerms,
    PrepaymentInput, PrepaymentResult, StrategyComparison,
};
use crate::state::{
    elapsed_periods, reconcile_balance, reconcile_paid_periods, BalanceReconciliation,
    PaidPeriodsReconciliation,
};
use crate::types::{LoanCharges, LoanId, LoanType, PrepaymentStrategy};

/// a loan as tracked by the dashboard: terms plus whatever the caller stores about it
///
/// Every operation reads "today" once from the supplied time provider and hands
/// that date to the pure calculators.
#[derive(Debug)]
pub struct Loan {
    pub id: LoanId,
    pub name: String,
    pub loan_type: LoanType,
    pub terms: LoanTerms,
    pub charges: LoanCharges,
    /// installments recorded as paid by the caller's ledger
    pub paid_emis: Option<u32>,
    /// outstanding balance as last stored by the caller
    pub stored_outstanding: Option<Money>,
    pub config: EngineConfig,
    pub events: EventStore,
    closure: Option<Closure>,
}

#[derive(Debug, Clone, Copy)]
struct Closure {
    on: NaiveDate,
    /// installments paid before the closing prepayment
    after_periods: u32,
}

struct ProgressFigures {
    remaining_periods: u32,
    outstanding_principal: Money,
    principal_paid: Money,
    interest_paid: Money,
    interest_remaining: Money,
    total_interest: Money,
    progress_percent: Decimal,
    next_due: Option<(NaiveDate, Money)>,
    overdue_periods: u32,
    overdue_amount: Money,
}

/// dashboard figures for a loan on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_id: LoanId,
    pub as_of: NaiveDate,
    pub emi: Money,
    pub paid_periods: PaidPeriodsReconciliation,
    pub remaining_periods: u32,
    pub outstanding_principal: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub interest_remaining: Money,
    pub total_interest: Money,
    pub progress_percent: Decimal,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_amount: Option<Money>,
    pub overdue_periods: u32,
    pub overdue_amount: Money,
    pub maturity_date: NaiveDate,
    /// present only when the caller stored a balance to compare against
    pub balance_check: Option<BalanceReconciliation>,
    pub charges: LoanCharges,
    pub closed: bool,
}

impl Loan {
    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    pub fn emi(&self) -> Result<Money> {
        self.terms.emi()
    }

    pub fn is_closed(&self) -> bool {
        self.closure.is_some()
    }

    pub fn closed_on(&self) -> Option<NaiveDate> {
        self.closure.map(|c| c.on)
    }

    /// amortization schedule as of today
    pub fn schedule(&mut self, time_provider: &SafeTimeProvider) -> Result<AmortizationSchedule> {
        let today = time_provider.now().date_naive();
        self.schedule_as_of(today)
    }

    /// headline figures as of today
    ///
    /// A closed loan reports the figures frozen at closure: nothing outstanding,
    /// overdue or due, and the whole principal repaid.
    pub fn summary(&mut self, time_provider: &SafeTimeProvider) -> Result<LoanSummary> {
        let today = time_provider.now().date_naive();
        let schedule = self.schedule_as_of(today)?;

        let figures = match self.closure {
            Some(closure) => {
                let interest_paid = schedule
                    .period(closure.after_periods)
                    .map(|p| p.cumulative_interest)
                    .unwrap_or(Money::ZERO);

                ProgressFigures {
                    remaining_periods: 0,
                    outstanding_principal: Money::ZERO,
                    principal_paid: self.terms.principal,
                    interest_paid,
                    interest_remaining: Money::ZERO,
                    total_interest: interest_paid,
                    progress_percent: Decimal::ONE_HUNDRED,
                    next_due: None,
                    overdue_periods: 0,
                    overdue_amount: Money::ZERO,
                }
            }
            None => ProgressFigures {
                remaining_periods: self.terms.tenure_months - schedule.reconciliation.effective_periods,
                outstanding_principal: schedule.outstanding_principal(),
                principal_paid: schedule.principal_paid(),
                interest_paid: schedule.interest_paid(),
                interest_remaining: schedule.interest_remaining(),
                total_interest: schedule.total_interest,
                progress_percent: schedule.progress_percent(),
                next_due: schedule.next_due().map(|p| (p.due_date, p.emi_amount)),
                overdue_periods: schedule.overdue_periods().count() as u32,
                overdue_amount: schedule.overdue_amount(),
            },
        };

        let balance_check = self.stored_outstanding.map(|stored| {
            reconcile_balance(
                figures.outstanding_principal,
                stored,
                self.config.reconciliation_tolerance,
                self.config.rounding_tolerance,
            )
        });

        if let Some(check) = balance_check.filter(|c| !c.is_on_track()) {
            self.events.emit(Event::BalanceOffTrack {
                loan_id: self.id,
                theoretical: check.theoretical,
                stored: check.stored,
                deviation: check.deviation,
                status: check.status,
            });
        }

        Ok(LoanSummary {
            loan_id: self.id,
            as_of: today,
            emi: schedule.emi,
            paid_periods: schedule.reconciliation,
            remaining_periods: figures.remaining_periods,
            outstanding_principal: figures.outstanding_principal,
            principal_paid: figures.principal_paid,
            interest_paid: figures.interest_paid,
            interest_remaining: figures.interest_remaining,
            total_interest: figures.total_interest,
            progress_percent: figures.progress_percent,
            next_due_date: figures.next_due.map(|(date, _)| date),
            next_due_amount: figures.next_due.map(|(_, amount)| amount),
            overdue_periods: figures.overdue_periods,
            overdue_amount: figures.overdue_amount,
            maturity_date: self.terms.maturity_date(),
            balance_check,
            charges: self.charges,
            closed: self.is_closed(),
        })
    }

    /// what a prepayment made today would do, without changing the loan
    pub fn simulate_prepayment(
        &mut self,
        amount: Money,
        strategy: PrepaymentStrategy,
        time_provider: &SafeTimeProvider,
    ) -> Result<PrepaymentResult> {
        let today = time_provider.now().date_naive();
        let result = self.simulate_as_of(amount, strategy, today)?;

        self.events.emit(Event::PrepaymentSimulated {
            loan_id: self.id,
            amount,
            strategy,
            interest_savings: result.interest_savings,
            as_of: today,
        });

        Ok(result)
    }

    /// both strategies side by side for a prepayment made today
    pub fn compare_prepayment(&self, amount: Money, time_provider: &SafeTimeProvider) -> Result<StrategyComparison> {
        self.ensure_open()?;
        let today = time_provider.now().date_naive();
        compare_strategies(&self.terms, self.paid_periods_as_of(today), amount)
    }

    /// commit a prepayment: the loan continues on the revised terms,
    /// or closes when the prepayment covers the whole balance
    pub fn apply_prepayment(
        &mut self,
        amount: Money,
        strategy: PrepaymentStrategy,
        time_provider: &SafeTimeProvider,
    ) -> Result<PrepaymentResult> {
        let today = time_provider.now().date_naive();
        let result = self.simulate_as_of(amount, strategy, today)?;

        self.events.emit(Event::PrepaymentApplied {
            loan_id: self.id,
            amount,
            strategy,
            interest_savings: result.interest_savings,
            savings_percentage: result.interest_savings_percentage,
            as_of: today,
        });

        match result.revised_terms(&self.terms) {
            Some(revised) => {
                self.events.emit(Event::TermsRevised {
                    loan_id: self.id,
                    old_principal: self.terms.principal,
                    new_principal: revised.principal,
                    old_tenure_months: self.terms.tenure_months,
                    new_tenure_months: revised.tenure_months,
                    new_start_date: revised.start_date,
                });

                self.terms = revised;
                // ledger restarts with the revised schedule
                self.paid_emis = self.paid_emis.map(|_| 0);
                self.stored_outstanding = Some(revised.principal);
            }
            None => {
                self.closure = Some(Closure {
                    on: today,
                    after_periods: result.elapsed_periods,
                });
                self.stored_outstanding = Some(Money::ZERO);

                self.events.emit(Event::LoanClosed {
                    loan_id: self.id,
                    closed_on: today,
                    final_amount: amount,
                });
            }
        }

        Ok(result)
    }

    /// pretty json view as of today
    pub fn json(&mut self, time_provider: &SafeTimeProvider) -> String {
        use crate::serialization::LoanView;

        match self.summary(time_provider) {
            Ok(summary) => LoanView::new(self, &summary)
                .to_json_pretty()
                .unwrap_or_else(|e| format!("JSON error: {}", e)),
            Err(e) => format!("calculation error: {}", e),
        }
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    fn schedule_as_of(&mut self, as_of: NaiveDate) -> Result<AmortizationSchedule> {
        let schedule = generate_schedule(&self.terms, as_of, self.paid_emis)?;

        self.events.emit(Event::ScheduleGenerated {
            loan_id: self.id,
            as_of,
            periods: schedule.periods.len() as u32,
            paid_periods: schedule.paid_count(),
            overdue_periods: schedule.overdue_periods().count() as u32,
        });

        let reconciliation = schedule.reconciliation;
        // a closed loan's ledger stops moving while the calendar does not
        let mismatch = reconciliation.mismatch && !self.is_closed();
        if let (true, Some(ledger)) = (mismatch, reconciliation.ledger_periods) {
            self.events.emit(Event::PaidPeriodsMismatch {
                loan_id: self.id,
                ledger_periods: ledger,
                elapsed_periods: reconciliation.elapsed_periods,
                as_of,
            });
        }

        Ok(schedule)
    }

    fn simulate_as_of(&self, amount: Money, strategy: PrepaymentStrategy, as_of: NaiveDate) -> Result<PrepaymentResult> {
        self.ensure_open()?;
        simulate_prepayment(
            &self.terms,
            &PrepaymentInput {
                elapsed_periods: self.paid_periods_as_of(as_of),
                prepayment_amount: amount,
                strategy,
            },
        )
    }

    fn paid_periods_as_of(&self, as_of: NaiveDate) -> u32 {
        let elapsed = elapsed_periods(self.terms.start_date, as_of, self.terms.tenure_months);
        reconcile_paid_periods(elapsed, self.paid_emis, self.terms.tenure_months).effective_periods
    }

    fn ensure_open(&self) -> Result<()> {
        match self.closure {
            Some(closure) => Err(AmortizationError::InvalidPrepayment {
                reason: format!("loan closed on {}", closure.on),
            }),
            None => Ok(()),
        }
    }
}

/// builder for tracked loans
#[derive(Debug, Default)]
pub struct LoanBuilder {
    name: Option<String>,
    loan_type: Option<LoanType>,
    amount: Option<Money>,
    rate: Option<Rate>,
    tenure_months: Option<u32>,
    start_date: Option<NaiveDate>,
    charges: LoanCharges,
    paid_emis: Option<u32>,
    stored_outstanding: Option<Money>,
    config: Option<EngineConfig>,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn loan_type(mut self, loan_type: LoanType) -> Self {
        self.loan_type = Some(loan_type);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// annual rate as typed on a form, e.g. `dec!(8.5)`
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.rate = Some(Rate::from_annual_percent(percent));
        self
    }

    pub fn tenure_months(mut self, months: u32) -> Self {
        self.tenure_months = Some(months);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn charges(mut self, charges: LoanCharges) -> Self {
        self.charges = charges;
        self
    }

    pub fn paid_emis(mut self, count: u32) -> Self {
        self.paid_emis = Some(count);
        self
    }

    pub fn stored_outstanding(mut self, amount: Money) -> Self {
        self.stored_outstanding = Some(amount);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// build, starting today by the system clock if no start date was given
    pub fn build(self) -> Result<Loan> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// build with an explicit time provider for the default start date
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<Loan> {
        let amount = self.amount.ok_or(AmortizationError::InvalidConfiguration {
            message: "amount required".to_string(),
        })?;

        let rate = self.rate.ok_or(AmortizationError::InvalidConfiguration {
            message: "rate required".to_string(),
        })?;

        let tenure_months = self.tenure_months.ok_or(AmortizationError::InvalidConfiguration {
            message: "tenure required".to_string(),
        })?;

        let config = self.config.unwrap_or_default();
        config.validate()?;

        if tenure_months > config.max_tenure_months {
            return Err(AmortizationError::InvalidTenure { months: tenure_months });
        }

        let start_date = self
            .start_date
            .unwrap_or_else(|| time_provider.now().date_naive());

        let terms = LoanTerms::new(amount, rate, tenure_months, start_date)?;
        let emi = terms.emi()?;
        let loan_type = self.loan_type.unwrap_or_default();

        let mut loan = Loan {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(|| format!("{:?}", loan_type)),
            loan_type,
            terms,
            charges: self.charges,
            paid_emis: self.paid_emis,
            stored_outstanding: self.stored_outstanding,
            config,
            events: EventStore::new(),
            closure: None,
        };

        loan.events.emit(Event::LoanCreated {
            loan_id: loan.id,
            principal: amount,
            annual_rate: rate,
            tenure_months,
            emi,
        });

        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaidPeriodsSource, ReconciliationStatus};
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn clock(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
        ))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn home_loan() -> LoanBuilder {
        Loan::builder()
            .name("Home loan - HDFC")
            .loan_type(LoanType::HomeLoan)
            .amount(Money::from_major(1_000_000))
            .rate_percent(dec!(9))
            .tenure_months(120)
            .start_date(date(2022, 4, 5))
    }

    #[test]
    fn test_builder_requires_core_fields() {
        let err = Loan::builder().rate_percent(dec!(9)).tenure_months(12).build_with_time(&clock(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfiguration { .. }));

        let err = home_loan().tenure_months(0).build_with_time(&clock(2024, 1, 1)).unwrap_err();
        assert_eq!(err, AmortizationError::InvalidTenure { months: 0 });

        let err = home_loan().tenure_months(600).build_with_time(&clock(2024, 1, 1)).unwrap_err();
        assert_eq!(err, AmortizationError::InvalidTenure { months: 600 });
    }

    #[test]
    fn test_builder_defaults_start_to_today() {
        let time = clock(2024, 2, 10);
        let loan = Loan::builder()
            .amount(Money::from_major(50_000))
            .rate_percent(dec!(12))
            .tenure_months(12)
            .build_with_time(&time)
            .unwrap();

        assert_eq!(loan.terms.start_date, date(2024, 2, 10));
        assert_eq!(loan.loan_type, LoanType::PersonalLoan);
        assert_eq!(loan.name, "PersonalLoan");
        assert!(matches!(loan.events.events()[0], Event::LoanCreated { .. }));
    }

    #[test]
    fn test_summary_from_elapsed_time() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().build_with_time(&time).unwrap();

        let summary = loan.summary(&time).unwrap();
        assert_eq!(summary.as_of, date(2024, 4, 20));
        assert_eq!(summary.paid_periods.effective_periods, 24);
        assert_eq!(summary.paid_periods.source, PaidPeriodsSource::ElapsedTime);
        assert_eq!(summary.remaining_periods, 96);
        assert_eq!(summary.outstanding_principal.round_dp(0), Money::from_major(864_669));
        assert_eq!(summary.next_due_date, Some(date(2024, 5, 5)));
        assert_eq!(summary.overdue_periods, 0);
        assert_eq!(summary.maturity_date, date(2032, 4, 5));
        assert!(summary.balance_check.is_none());
        assert!(!summary.closed);
    }

    #[test]
    fn test_time_advances_between_calls() {
        let time = clock(2024, 4, 20);
        let control = time.test_control().unwrap();
        let mut loan = home_loan().build_with_time(&time).unwrap();

        let before = loan.summary(&time).unwrap();
        control.advance(Duration::days(31));
        let after = loan.summary(&time).unwrap();

        assert_eq!(after.paid_periods.effective_periods, before.paid_periods.effective_periods + 1);
        assert!(after.outstanding_principal < before.outstanding_principal);
    }

    #[test]
    fn test_ledger_mismatch_is_reported_not_overwritten() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().paid_emis(22).build_with_time(&time).unwrap();
        loan.take_events();

        let summary = loan.summary(&time).unwrap();
        assert_eq!(summary.paid_periods.effective_periods, 22);
        assert_eq!(summary.paid_periods.elapsed_periods, 24);
        assert!(summary.paid_periods.mismatch);
        assert_eq!(summary.overdue_periods, 2);

        let events = loan.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            Event::PaidPeriodsMismatch { ledger_periods: 22, elapsed_periods: 24, .. }
        )));
    }

    #[test]
    fn test_stored_balance_reconciliation() {
        let time = clock(2024, 4, 20);

        let mut on_track = home_loan()
            .stored_outstanding(Money::from_major(880_000))
            .build_with_time(&time)
            .unwrap();
        let check = on_track.summary(&time).unwrap().balance_check.unwrap();
        assert_eq!(check.status, ReconciliationStatus::OnTrack);

        let mut drifted = home_loan()
            .stored_outstanding(Money::from_major(700_000))
            .build_with_time(&time)
            .unwrap();
        let check = drifted.summary(&time).unwrap().balance_check.unwrap();
        assert_eq!(check.status, ReconciliationStatus::OffTrack);
        assert_eq!(check.stored, Money::from_major(700_000));
        assert!(drifted
            .take_events()
            .iter()
            .any(|e| matches!(e, Event::BalanceOffTrack { .. })));
    }

    #[test]
    fn test_simulation_does_not_change_loan() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().build_with_time(&time).unwrap();
        let terms = loan.terms;

        let result = loan
            .simulate_prepayment(Money::from_major(100_000), PrepaymentStrategy::ReduceTenure, &time)
            .unwrap();
        assert_eq!(result.elapsed_periods, 24);
        assert_eq!(result.new_tenure, 105);
        assert_eq!(loan.terms, terms);
    }

    #[test]
    fn test_compare_prepayment() {
        let time = clock(2024, 4, 20);
        let loan = home_loan().build_with_time(&time).unwrap();

        let comparison = loan.compare_prepayment(Money::from_major(100_000), &time).unwrap();
        assert_eq!(comparison.recommended(), PrepaymentStrategy::ReduceTenure);
    }

    #[test]
    fn test_apply_prepayment_revises_terms() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().paid_emis(24).build_with_time(&time).unwrap();

        let result = loan
            .apply_prepayment(Money::from_major(100_000), PrepaymentStrategy::ReduceEmi, &time)
            .unwrap();

        assert_eq!(loan.terms.tenure_months, 96);
        assert_eq!(loan.terms.start_date, date(2024, 4, 5));
        assert_eq!(loan.terms.principal, result.new_outstanding);
        assert_eq!(loan.emi().unwrap(), result.new_emi.unwrap());
        assert_eq!(loan.paid_emis, Some(0));

        let summary = loan.summary(&time).unwrap();
        assert_eq!(summary.outstanding_principal, result.new_outstanding);
        assert!(summary.balance_check.unwrap().is_on_track());
        assert_eq!(summary.next_due_date, Some(date(2024, 5, 5)));

        let events = loan.take_events();
        assert!(events.iter().any(|e| matches!(e, Event::PrepaymentApplied { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::TermsRevised { new_tenure_months: 96, .. })));
    }

    #[test]
    fn test_full_prepayment_closes_loan() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().build_with_time(&time).unwrap();
        let outstanding = loan.terms.outstanding_after(24).unwrap();

        let result = loan
            .apply_prepayment(outstanding, PrepaymentStrategy::ReduceTenure, &time)
            .unwrap();
        assert!(result.closes_loan());
        assert!(loan.is_closed());
        assert_eq!(loan.closed_on(), Some(date(2024, 4, 20)));

        let summary = loan.summary(&time).unwrap();
        assert!(summary.closed);
        assert_eq!(summary.outstanding_principal, Money::ZERO);
        assert_eq!(summary.remaining_periods, 0);
        assert!(summary.next_due_date.is_none());

        let err = loan
            .simulate_prepayment(Money::from_major(1), PrepaymentStrategy::ReduceEmi, &time)
            .unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidPrepayment { .. }));
    }

    #[test]
    fn test_reduce_tenure_keeps_installment() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().paid_emis(24).build_with_time(&time).unwrap();
        let emi_before = loan.emi().unwrap();

        let result = loan
            .apply_prepayment(Money::from_major(100_000), PrepaymentStrategy::ReduceTenure, &time)
            .unwrap();

        assert_eq!(loan.emi().unwrap(), emi_before);
        assert_eq!(loan.terms.tenure_months, 81);
        assert_eq!(loan.terms.fixed_emi, Some(emi_before));

        let summary = loan.summary(&time).unwrap();
        assert_eq!(summary.emi, emi_before);
        assert_eq!(summary.next_due_amount, Some(emi_before));
        assert_eq!(summary.maturity_date, date(2031, 1, 5));

        let schedule = loan.schedule(&time).unwrap();
        let last = schedule.periods.last().unwrap();
        assert!(last.emi_amount < emi_before);
        assert_eq!(last.remaining_principal, Money::ZERO);

        let implied_interest = emi_before * Decimal::from(24) + Money::from_major(100_000)
            + schedule.total_payment
            - Money::from_major(1_000_000);
        assert!(implied_interest.approx_eq(result.new_total_interest, Money::from_str_exact("0.01").unwrap()));
    }

    #[test]
    fn test_closed_loan_stays_settled_as_time_passes() {
        let time = clock(2024, 4, 20);
        let control = time.test_control().unwrap();
        let mut loan = home_loan().paid_emis(24).build_with_time(&time).unwrap();

        let before = loan.summary(&time).unwrap();
        let outstanding = loan.terms.outstanding_after(24).unwrap();
        loan.apply_prepayment(outstanding, PrepaymentStrategy::ReduceTenure, &time)
            .unwrap();
        loan.take_events();

        control.advance(Duration::days(95));
        let summary = loan.summary(&time).unwrap();

        assert!(summary.closed);
        assert_eq!(summary.overdue_periods, 0);
        assert_eq!(summary.overdue_amount, Money::ZERO);
        assert_eq!(summary.progress_percent, Decimal::ONE_HUNDRED);
        assert_eq!(summary.principal_paid, Money::from_major(1_000_000));
        assert_eq!(summary.interest_paid, before.interest_paid);
        assert_eq!(summary.total_interest, before.interest_paid);
        assert_eq!(summary.remaining_periods, 0);
        assert!(summary.balance_check.unwrap().is_on_track());

        let events = loan.take_events();
        assert!(!events.iter().any(|e| matches!(e, Event::PaidPeriodsMismatch { .. })));
    }

    #[test]
    fn test_charges_pass_through() {
        let time = clock(2024, 4, 20);
        let charges = LoanCharges {
            processing_fee: Some(Money::from_major(10_000)),
            insurance: None,
            prepayment_charges: None,
        };
        let mut loan = home_loan().charges(charges).build_with_time(&time).unwrap();
        let without = home_loan().build_with_time(&time).unwrap();

        assert_eq!(loan.emi().unwrap(), without.emi().unwrap());
        assert_eq!(loan.summary(&time).unwrap().charges, charges);
    }

    #[test]
    fn test_json_view() {
        let time = clock(2024, 4, 20);
        let mut loan = home_loan().build_with_time(&time).unwrap();

        let json = loan.json(&time);
        assert!(json.contains("\"name\": \"Home loan - HDFC\""));
        assert!(json.contains("\"emi\": \"12667.58\""));
    }
}
