/// serialization support for dashboard views
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::deposit::{DepositValuation, FixedDeposit};
use crate::loan::{Loan, LoanSummary};
use crate::payments::{AmortizationSchedule, PrepaymentResult};
use crate::types::{LoanCharges, LoanId, LoanType, PaymentStatus, PrepaymentStrategy, ReconciliationStatus};

/// serializable view of a loan, money rounded for display
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub name: String,
    pub loan_type: LoanType,
    pub as_of: NaiveDate,
    pub closed: bool,
    pub terms: TermsView,
    pub emi: Money,
    pub progress: ProgressView,
    pub reconciliation: ReconciliationView,
    #[serde(default)]
    pub charges: LoanCharges,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub tenure_months: u32,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressView {
    pub paid_periods: u32,
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
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReconciliationView {
    pub elapsed_periods: u32,
    pub ledger_periods: Option<u32>,
    pub periods_mismatch: bool,
    pub stored_outstanding: Option<Money>,
    pub balance_deviation_percent: Option<Decimal>,
    pub balance_status: Option<ReconciliationStatus>,
}

impl LoanView {
    pub fn new(loan: &Loan, summary: &LoanSummary) -> Self {
        let config = &loan.config;
        let show = |amount: Money| config.present(amount);
        let percent = |value: Decimal| value.round_dp(config.display_decimal_places);

        LoanView {
            id: loan.id,
            name: loan.name.clone(),
            loan_type: loan.loan_type,
            as_of: summary.as_of,
            closed: summary.closed,
            terms: TermsView {
                principal: show(loan.terms.principal),
                annual_rate_percent: loan.terms.annual_rate.as_percentage().normalize(),
                tenure_months: loan.terms.tenure_months,
                start_date: loan.terms.start_date,
                maturity_date: summary.maturity_date,
            },
            emi: show(summary.emi),
            progress: ProgressView {
                paid_periods: summary.paid_periods.effective_periods,
                remaining_periods: summary.remaining_periods,
                outstanding_principal: show(summary.outstanding_principal),
                principal_paid: show(summary.principal_paid),
                interest_paid: show(summary.interest_paid),
                interest_remaining: show(summary.interest_remaining),
                total_interest: show(summary.total_interest),
                progress_percent: percent(summary.progress_percent),
                next_due_date: summary.next_due_date,
                next_due_amount: summary.next_due_amount.map(show),
                overdue_periods: summary.overdue_periods,
                overdue_amount: show(summary.overdue_amount),
            },
            reconciliation: ReconciliationView {
                elapsed_periods: summary.paid_periods.elapsed_periods,
                ledger_periods: summary.paid_periods.ledger_periods,
                periods_mismatch: summary.paid_periods.mismatch,
                stored_outstanding: summary.balance_check.map(|c| show(c.stored)),
                balance_deviation_percent: summary.balance_check.map(|c| percent(c.deviation.as_percentage())),
                balance_status: summary.balance_check.map(|c| c.status),
            },
            charges: summary.charges,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// one schedule row for display
#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodView {
    pub period: u32,
    pub due_date: NaiveDate,
    pub emi: Money,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(default)]
    pub days_overdue: u32,
}

fn is_zero(days: &u32) -> bool {
    *days == 0
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleView {
    pub as_of: NaiveDate,
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub periods: Vec<PeriodView>,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &AmortizationSchedule, config: &EngineConfig) -> Self {
        ScheduleView {
            as_of: schedule.as_of,
            emi: config.present(schedule.emi),
            total_interest: config.present(schedule.total_interest),
            total_payment: config.present(schedule.total_payment),
            periods: schedule
                .periods
                .iter()
                .map(|p| PeriodView {
                    period: p.period,
                    due_date: p.due_date,
                    emi: config.present(p.emi_amount),
                    principal: config.present(p.principal_component),
                    interest: config.present(p.interest_component),
                    balance: config.present(p.remaining_principal),
                    status: p.status,
                    days_overdue: p.days_overdue,
                })
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// prepayment outcome for display
#[derive(Debug, Serialize, Deserialize)]
pub struct PrepaymentView {
    pub strategy: PrepaymentStrategy,
    pub prepayment_amount: Money,
    pub new_outstanding: Money,
    pub original_emi: Money,
    pub new_emi: Option<Money>,
    pub original_tenure: u32,
    pub new_tenure: u32,
    pub tenure_reduction_months: u32,
    pub interest_savings: Money,
    pub interest_savings_percent: Decimal,
}

impl PrepaymentView {
    pub fn from_result(result: &PrepaymentResult, config: &EngineConfig) -> Self {
        PrepaymentView {
            strategy: result.strategy,
            prepayment_amount: config.present(result.prepayment_amount),
            new_outstanding: config.present(result.new_outstanding),
            original_emi: config.present(result.original_emi),
            new_emi: result.new_emi.map(|emi| config.present(emi)),
            original_tenure: result.original_tenure,
            new_tenure: result.new_tenure,
            tenure_reduction_months: result.tenure_reduction_months,
            interest_savings: config.present(result.interest_savings),
            interest_savings_percent: result
                .interest_savings_percentage
                .round_dp(config.display_decimal_places),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// deposit valuation for display
#[derive(Debug, Serialize, Deserialize)]
pub struct DepositView {
    pub id: Uuid,
    pub name: String,
    pub as_of: NaiveDate,
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub current_value: Money,
    pub maturity_amount: Money,
    pub interest_at_maturity: Money,
    pub days_to_maturity: u32,
    pub matured: bool,
}

impl DepositView {
    pub fn new(deposit: &FixedDeposit, valuation: &DepositValuation, config: &EngineConfig) -> Self {
        DepositView {
            id: deposit.id,
            name: deposit.name.clone(),
            as_of: valuation.as_of,
            principal: config.present(deposit.terms.principal),
            annual_rate_percent: deposit.terms.annual_rate.as_percentage().normalize(),
            start_date: deposit.terms.start_date,
            end_date: deposit.terms.end_date,
            current_value: config.present(valuation.current.maturity_amount),
            maturity_amount: config.present(valuation.maturity.maturity_amount),
            interest_at_maturity: config.present(valuation.maturity.interest_earned),
            days_to_maturity: valuation.days_to_maturity,
            matured: valuation.matured,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
