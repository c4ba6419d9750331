use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a tracked loan
pub type LoanId = Uuid;

/// loan categories shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoanType {
    HomeLoan,
    CarLoan,
    #[default]
    PersonalLoan,
    EducationLoan,
    GoldLoan,
    BusinessLoan,
    Other,
}

/// status of a single installment relative to the as-of date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// not yet due, or due today
    Pending,
    /// counted as paid, by ledger or by elapsed time
    Paid,
    /// due date passed without a recorded payment
    Overdue,
}

/// how a lump-sum prepayment is absorbed by the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepaymentStrategy {
    /// keep the EMI, finish earlier
    ReduceTenure,
    /// keep the end date, pay less each month
    ReduceEmi,
}

/// where the effective paid-period count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaidPeriodsSource {
    /// authoritative payment ledger supplied by the caller
    Ledger,
    /// whole calendar months elapsed since the start date
    ElapsedTime,
}

/// outcome of comparing two independent figures for the same quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconciliationStatus {
    OnTrack,
    OffTrack,
}

/// optional charges carried with a loan record; no formula reads them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoanCharges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_fee: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayment_charges: Option<Money>,
}

impl LoanCharges {
    /// sum of whichever charges are present
    pub fn total(&self) -> Money {
        [self.processing_fee, self.insurance, self.prepayment_charges]
            .into_iter()
            .flatten()
            .sum()
    }
}
