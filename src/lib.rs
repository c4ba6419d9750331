pub mod calendar;
pub mod config;
pub mod decimal;
pub mod deposit;
pub mod errors;
pub mod events;
pub mod interest;
pub mod loan;
pub mod payments;
pub mod serialization;
pub mod state;
pub mod types;

// re-export key types
pub use config::EngineConfig;
pub use decimal::{Money, Rate};
pub use deposit::{calculate_maturity_amount, DepositValuation, FdTerms, FixedDeposit, MaturityResult};
pub use errors::{AmortizationError, Result};
pub use events::{Event, EventStore};
pub use interest::{effective_annual_rate, CompoundingEngine, CompoundingFrequency};
pub use loan::{Loan, LoanBuilder, LoanSummary};
pub use payments::{
    calculate_emi, compare_strategies, generate_schedule, outstanding_after, simulate_prepayment,
    AmortizationSchedule, LoanTerms, PrepaymentInput, PrepaymentResult, SchedulePeriod,
    StrategyComparison,
};
pub use serialization::{DepositView, LoanView, PrepaymentView, ScheduleView};
pub use state::{
    elapsed_periods, reconcile_balance, reconcile_paid_periods, BalanceReconciliation,
    PaidPeriodsReconciliation,
};
pub use types::{
    LoanCharges, LoanId, LoanType, PaidPeriodsSource, PaymentStatus, PrepaymentStrategy,
    ReconciliationStatus,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
