use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::types::{LoanId, PrepaymentStrategy, ReconciliationStatus};

/// everything worth auditing about a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // loan lifecycle
    LoanCreated {
        loan_id: LoanId,
        principal: Money,
        annual_rate: Rate,
        tenure_months: u32,
        emi: Money,
    },
    TermsRevised {
        loan_id: LoanId,
        old_principal: Money,
        new_principal: Money,
        old_tenure_months: u32,
        new_tenure_months: u32,
        new_start_date: NaiveDate,
    },
    LoanClosed {
        loan_id: LoanId,
        closed_on: NaiveDate,
        final_amount: Money,
    },

    // schedule events
    ScheduleGenerated {
        loan_id: LoanId,
        as_of: NaiveDate,
        periods: u32,
        paid_periods: u32,
        overdue_periods: u32,
    },
    PaidPeriodsMismatch {
        loan_id: LoanId,
        ledger_periods: u32,
        elapsed_periods: u32,
        as_of: NaiveDate,
    },
    BalanceOffTrack {
        loan_id: LoanId,
        theoretical: Money,
        stored: Money,
        deviation: Rate,
        status: ReconciliationStatus,
    },

    // prepayment events
    PrepaymentSimulated {
        loan_id: LoanId,
        amount: Money,
        strategy: PrepaymentStrategy,
        interest_savings: Money,
        as_of: NaiveDate,
    },
    PrepaymentApplied {
        loan_id: LoanId,
        amount: Money,
        strategy: PrepaymentStrategy,
        interest_savings: Money,
        savings_percentage: Decimal,
        as_of: NaiveDate,
    },

    // deposit events
    DepositValued {
        deposit_id: Uuid,
        as_of: NaiveDate,
        current_value: Money,
        maturity_amount: Money,
        date_range_clamped: bool,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
