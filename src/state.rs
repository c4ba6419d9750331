use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::whole_months_between;
use crate::decimal::{Money, Rate};
use crate::types::{PaidPeriodsSource, ReconciliationStatus};

/// installments considered elapsed purely from the calendar:
/// whole months between start and as-of, clamped to `[0, tenure]`
pub fn elapsed_periods(start_date: NaiveDate, as_of: NaiveDate, tenure_months: u32) -> u32 {
    whole_months_between(start_date, as_of).min(tenure_months)
}

/// the two notions of "installments paid" side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidPeriodsReconciliation {
    /// count derived from elapsed calendar months
    pub elapsed_periods: u32,
    /// count reported by the caller's payment ledger, as given
    pub ledger_periods: Option<u32>,
    /// count used for the schedule
    pub effective_periods: u32,
    pub source: PaidPeriodsSource,
    /// ledger present and disagreeing with elapsed time (or with tenure)
    pub mismatch: bool,
}

/// prefer the ledger when present; flag disagreement instead of hiding it
pub fn reconcile_paid_periods(
    elapsed: u32,
    ledger: Option<u32>,
    tenure_months: u32,
) -> PaidPeriodsReconciliation {
    match ledger {
        Some(count) => {
            let effective = count.min(tenure_months);
            PaidPeriodsReconciliation {
                elapsed_periods: elapsed,
                ledger_periods: Some(count),
                effective_periods: effective,
                source: PaidPeriodsSource::Ledger,
                mismatch: count != elapsed || count > tenure_months,
            }
        }
        None => PaidPeriodsReconciliation {
            elapsed_periods: elapsed,
            ledger_periods: None,
            effective_periods: elapsed,
            source: PaidPeriodsSource::ElapsedTime,
            mismatch: false,
        },
    }
}

/// stored outstanding balance checked against the amortization formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReconciliation {
    pub theoretical: Money,
    pub stored: Money,
    /// stored minus theoretical
    pub difference: Money,
    /// |difference| / theoretical, as a fraction
    pub deviation: Rate,
    pub tolerance: Rate,
    pub status: ReconciliationStatus,
}

impl BalanceReconciliation {
    pub fn is_on_track(&self) -> bool {
        self.status == ReconciliationStatus::OnTrack
    }
}

/// compare a stored balance with the theoretical one
///
/// A zero theoretical balance has no meaningful relative deviation; it is on
/// track only while the stored figure is within `rounding_tolerance`.
pub fn reconcile_balance(
    theoretical: Money,
    stored: Money,
    tolerance: Rate,
    rounding_tolerance: Money,
) -> BalanceReconciliation {
    let difference = stored - theoretical;

    let (deviation, within) = if theoretical.is_positive() {
        let deviation = difference.abs().as_decimal() / theoretical.as_decimal();
        (deviation, deviation <= tolerance.as_decimal())
    } else {
        let within = difference.abs() <= rounding_tolerance;
        (if within { Decimal::ZERO } else { Decimal::ONE }, within)
    };

    BalanceReconciliation {
        theoretical,
        stored,
        difference,
        deviation: Rate::from_decimal(deviation),
        tolerance,
        status: if within {
            ReconciliationStatus::OnTrack
        } else {
            ReconciliationStatus::OffTrack
        },
    }
}
