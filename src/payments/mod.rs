pub mod amortization;
pub mod emi;
pub mod prepayment;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};

pub use amortization::{generate_schedule, AmortizationSchedule, SchedulePeriod};
pub use emi::{
    calculate_emi, outstanding_after, payoff_cash_flow, remaining_tenure_for_emi,
    validate_loan_inputs, MAX_TENURE_MONTHS,
};
pub use prepayment::{
    compare_strategies, simulate_prepayment, PrepaymentInput, PrepaymentResult,
    StrategyComparison,
};

/// the parameters of a standard reducing-balance loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_months: u32,
    pub start_date: NaiveDate,
    /// installment carried over from earlier terms; the last one pays only the residual
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_emi: Option<Money>,
}

impl LoanTerms {
    /// build validated terms
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        tenure_months: u32,
        start_date: NaiveDate,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate,
            tenure_months,
            start_date,
            fixed_emi: None,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// keep paying `emi` instead of re-amortizing over the tenure
    pub fn with_fixed_emi(self, emi: Money) -> Result<Self> {
        let terms = Self {
            fixed_emi: Some(emi),
            ..self
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<()> {
        validate_loan_inputs(self.principal, self.annual_rate, self.tenure_months)?;

        if let Some(emi) = self.fixed_emi {
            let first_interest = self.principal * self.annual_rate.monthly_rate();
            if !emi.is_positive() || (!self.annual_rate.is_zero() && emi <= first_interest) {
                return Err(AmortizationError::CalculationError {
                    message: format!("installment {} does not amortize {}", emi, self.principal),
                });
            }
        }
        Ok(())
    }

    /// monthly installment for these terms
    pub fn emi(&self) -> Result<Money> {
        match self.fixed_emi {
            Some(emi) => {
                self.validate()?;
                Ok(emi)
            }
            None => calculate_emi(self.principal, self.annual_rate, self.tenure_months),
        }
    }

    /// due date of the final installment
    pub fn maturity_date(&self) -> NaiveDate {
        add_months(self.start_date, self.tenure_months)
    }

    /// principal owed once `periods` installments have been paid
    pub fn outstanding_after(&self, periods: u32) -> Result<Money> {
        if periods >= self.tenure_months {
            self.validate()?;
            return Ok(Money::ZERO);
        }
        outstanding_after(self.principal, self.annual_rate, self.emi()?, periods)
    }

    /// interest over the full life of the loan
    pub fn total_interest(&self) -> Result<Money> {
        let emi = self.emi()?;
        let payments = match self.fixed_emi {
            Some(_) => payoff_cash_flow(self.principal, self.annual_rate, emi, self.tenure_months)?,
            None => emi * rust_decimal::Decimal::from(self.tenure_months),
        };
        Ok((payments - self.principal).max(Money::ZERO))
    }
}
