use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_months, days_between};
use crate::decimal::Money;
use crate::errors::Result;
use crate::state::{elapsed_periods, reconcile_paid_periods, PaidPeriodsReconciliation};
use crate::types::PaymentStatus;

use super::LoanTerms;

/// one installment in an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub period: u32,
    pub due_date: NaiveDate,
    pub opening_balance: Money,
    pub emi_amount: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_principal: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
    pub status: PaymentStatus,
    pub days_overdue: u32,
}

/// full installment ledger for a loan as seen on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub as_of: NaiveDate,
    pub emi: Money,
    pub periods: Vec<SchedulePeriod>,
    pub total_interest: Money,
    pub total_payment: Money,
    pub reconciliation: PaidPeriodsReconciliation,
}

/// expand loan terms into a per-installment schedule
///
/// Statuses come from `paid_periods_override` when supplied (installments
/// `1..=n` paid, later ones overdue once their due date has passed), otherwise
/// from the due dates alone. Nothing is paid before the start date.
pub fn generate_schedule(
    terms: &LoanTerms,
    as_of: NaiveDate,
    paid_periods_override: Option<u32>,
) -> Result<AmortizationSchedule> {
    let emi = terms.emi()?;
    let monthly_rate = terms.annual_rate.monthly_rate();

    let elapsed = elapsed_periods(terms.start_date, as_of, terms.tenure_months);
    let reconciliation = reconcile_paid_periods(elapsed, paid_periods_override, terms.tenure_months);
    let ledger_paid = paid_periods_override.map(|_| reconciliation.effective_periods);
    let not_started = as_of < terms.start_date;

    let mut periods = Vec::with_capacity(terms.tenure_months as usize);
    let mut balance = terms.principal;
    let mut cumulative_interest = Money::ZERO;
    let mut cumulative_principal = Money::ZERO;

    for i in 1..=terms.tenure_months {
        let due_date = add_months(terms.start_date, i);
        let interest_component = Money::from_decimal(balance.as_decimal() * monthly_rate);

        // last installment retires whatever rounding left behind
        let principal_component = if i == terms.tenure_months {
            balance
        } else {
            (emi - interest_component).min(balance)
        };

        let remaining_principal = balance - principal_component;
        cumulative_interest += interest_component;
        cumulative_principal += principal_component;

        let (status, days_overdue) = if not_started {
            (PaymentStatus::Pending, 0)
        } else {
            classify(i, due_date, as_of, ledger_paid)
        };

        periods.push(SchedulePeriod {
            period: i,
            due_date,
            opening_balance: balance,
            emi_amount: principal_component + interest_component,
            principal_component,
            interest_component,
            remaining_principal,
            cumulative_interest,
            cumulative_principal,
            status,
            days_overdue,
        });

        balance = remaining_principal;
    }

    let total_payment = periods.iter().map(|p| p.emi_amount).sum();

    Ok(AmortizationSchedule {
        terms: *terms,
        as_of,
        emi,
        periods,
        total_interest: cumulative_interest,
        total_payment,
        reconciliation,
    })
}

fn classify(
    period: u32,
    due_date: NaiveDate,
    as_of: NaiveDate,
    ledger_paid: Option<u32>,
) -> (PaymentStatus, u32) {
    let past_due = due_date < as_of;

    match ledger_paid {
        Some(paid) if period <= paid => (PaymentStatus::Paid, 0),
        Some(_) if past_due => {
            let days = days_between(due_date, as_of).max(0) as u32;
            (PaymentStatus::Overdue, days)
        }
        Some(_) => (PaymentStatus::Pending, 0),
        None if past_due => (PaymentStatus::Paid, 0),
        None => (PaymentStatus::Pending, 0),
    }
}

impl AmortizationSchedule {
    /// installment by 1-based number
    pub fn period(&self, number: u32) -> Option<&SchedulePeriod> {
        number
            .checked_sub(1)
            .and_then(|index| self.periods.get(index as usize))
    }

    /// principal owed after installment `number`; the full principal before the first
    pub fn balance_after(&self, number: u32) -> Money {
        if number == 0 {
            return self.terms.principal;
        }
        self.period(number.min(self.terms.tenure_months))
            .map(|p| p.remaining_principal)
            .unwrap_or(Money::ZERO)
    }

    pub fn paid_count(&self) -> u32 {
        self.periods
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .count() as u32
    }

    pub fn overdue_periods(&self) -> impl Iterator<Item = &SchedulePeriod> {
        self.periods
            .iter()
            .filter(|p| p.status == PaymentStatus::Overdue)
    }

    /// total amount currently overdue
    pub fn overdue_amount(&self) -> Money {
        self.overdue_periods().map(|p| p.emi_amount).sum()
    }

    /// first installment not yet paid
    pub fn next_due(&self) -> Option<&SchedulePeriod> {
        self.periods
            .iter()
            .find(|p| p.status != PaymentStatus::Paid)
    }

    /// principal owed after the installments marked paid
    pub fn outstanding_principal(&self) -> Money {
        self.balance_after(self.paid_count())
    }

    pub fn principal_paid(&self) -> Money {
        self.paid().map(|p| p.principal_component).sum()
    }

    pub fn interest_paid(&self) -> Money {
        self.paid().map(|p| p.interest_component).sum()
    }

    pub fn interest_remaining(&self) -> Money {
        (self.total_interest - self.interest_paid()).max(Money::ZERO)
    }

    /// paid principal as a percentage of the loan
    pub fn progress_percent(&self) -> rust_decimal::Decimal {
        self.terms.principal.share_percent(self.principal_paid())
    }

    fn paid(&self) -> impl Iterator<Item = &SchedulePeriod> {
        self.periods
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
    }
}
