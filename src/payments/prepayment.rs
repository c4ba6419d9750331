use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::types::PrepaymentStrategy;

use super::emi::{calculate_emi, payoff_cash_flow, remaining_tenure_for_emi};
use super::LoanTerms;

/// a lump-sum prepayment made after `elapsed_periods` installments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub elapsed_periods: u32,
    pub prepayment_amount: Money,
    pub strategy: PrepaymentStrategy,
}

/// raw figures describing the effect of a prepayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepaymentResult {
    pub strategy: PrepaymentStrategy,
    pub elapsed_periods: u32,
    pub prepayment_amount: Money,
    /// principal owed just before the prepayment
    pub current_outstanding: Money,
    /// principal owed just after the prepayment
    pub new_outstanding: Money,
    pub original_emi: Money,
    /// only reported for `ReduceEmi`
    pub new_emi: Option<Money>,
    pub original_tenure: u32,
    pub new_tenure: u32,
    pub tenure_reduction_months: u32,
    pub remaining_periods_before: u32,
    pub remaining_periods_after: u32,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_savings: Money,
    /// savings as a percentage of the original total interest
    pub interest_savings_percentage: Decimal,
}

impl PrepaymentResult {
    /// per-installment saving under `ReduceEmi`, zero otherwise
    pub fn monthly_emi_reduction(&self) -> Money {
        self.new_emi
            .map(|emi| (self.original_emi - emi).max(Money::ZERO))
            .unwrap_or(Money::ZERO)
    }

    /// prepayment retires the whole outstanding balance
    pub fn closes_loan(&self) -> bool {
        self.new_outstanding.is_zero()
    }

    /// terms to regenerate the schedule from after the prepayment;
    /// `None` once the loan is closed
    pub fn revised_terms(&self, original: &LoanTerms) -> Option<LoanTerms> {
        if self.closes_loan() || self.remaining_periods_after == 0 {
            return None;
        }

        // a shorter tenure keeps the old installment; only ReduceEmi re-amortizes
        let fixed_emi = match self.strategy {
            PrepaymentStrategy::ReduceTenure => Some(self.original_emi),
            PrepaymentStrategy::ReduceEmi => None,
        };

        Some(LoanTerms {
            principal: self.new_outstanding,
            annual_rate: original.annual_rate,
            tenure_months: self.remaining_periods_after,
            start_date: add_months(original.start_date, self.elapsed_periods),
            fixed_emi,
        })
    }
}

/// recompute tenure or EMI after a lump-sum prepayment
///
/// Interest totals count actual cash flows: installments already paid, the
/// prepayment itself and the installments still to come, less the principal.
pub fn simulate_prepayment(terms: &LoanTerms, input: &PrepaymentInput) -> Result<PrepaymentResult> {
    let original_emi = terms.emi()?;

    if input.elapsed_periods > terms.tenure_months {
        return Err(AmortizationError::InvalidPrepayment {
            reason: format!(
                "{} installments elapsed on a {} month loan",
                input.elapsed_periods, terms.tenure_months
            ),
        });
    }

    let current_outstanding = terms.outstanding_after(input.elapsed_periods)?;

    if !input.prepayment_amount.is_positive() {
        return Err(AmortizationError::InvalidPrepayment {
            reason: format!("amount {} must be greater than zero", input.prepayment_amount),
        });
    }
    if input.prepayment_amount > current_outstanding {
        return Err(AmortizationError::InvalidPrepayment {
            reason: format!(
                "amount {} exceeds outstanding principal {}",
                input.prepayment_amount, current_outstanding
            ),
        });
    }

    let new_outstanding = current_outstanding - input.prepayment_amount;
    let remaining_periods_before = terms.tenure_months - input.elapsed_periods;

    let (new_emi, remaining_periods_after, future_payments) = match input.strategy {
        PrepaymentStrategy::ReduceTenure => {
            let months = remaining_tenure_for_emi(new_outstanding, terms.annual_rate, original_emi)?
                .min(remaining_periods_before);
            let flows = payoff_cash_flow(new_outstanding, terms.annual_rate, original_emi, months)?;
            (None, months, flows)
        }
        PrepaymentStrategy::ReduceEmi => {
            if new_outstanding.is_zero() {
                (Some(Money::ZERO), 0, Money::ZERO)
            } else {
                let emi = calculate_emi(new_outstanding, terms.annual_rate, remaining_periods_before)?
                    .min(original_emi);
                (Some(emi), remaining_periods_before, emi * Decimal::from(remaining_periods_before))
            }
        }
    };

    let new_tenure = match input.strategy {
        PrepaymentStrategy::ReduceTenure => input.elapsed_periods + remaining_periods_after,
        PrepaymentStrategy::ReduceEmi => terms.tenure_months,
    };

    let original_total_interest = terms.total_interest()?;
    let paid_so_far = original_emi * Decimal::from(input.elapsed_periods);
    let new_total_interest =
        (paid_so_far + input.prepayment_amount + future_payments - terms.principal).max(Money::ZERO);
    let interest_savings = (original_total_interest - new_total_interest).max(Money::ZERO);

    Ok(PrepaymentResult {
        strategy: input.strategy,
        elapsed_periods: input.elapsed_periods,
        prepayment_amount: input.prepayment_amount,
        current_outstanding,
        new_outstanding,
        original_emi,
        new_emi,
        original_tenure: terms.tenure_months,
        new_tenure,
        tenure_reduction_months: terms.tenure_months - new_tenure,
        remaining_periods_before,
        remaining_periods_after,
        original_total_interest,
        new_total_interest,
        interest_savings,
        interest_savings_percentage: original_total_interest.share_percent(interest_savings),
    })
}

/// both strategies for the same prepayment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub reduce_tenure: PrepaymentResult,
    pub reduce_emi: PrepaymentResult,
}

impl StrategyComparison {
    /// strategy with the larger interest saving; ties keep the shorter loan
    pub fn recommended(&self) -> PrepaymentStrategy {
        if self.reduce_tenure.interest_savings >= self.reduce_emi.interest_savings {
            PrepaymentStrategy::ReduceTenure
        } else {
            PrepaymentStrategy::ReduceEmi
        }
    }

    pub fn result_for(&self, strategy: PrepaymentStrategy) -> &PrepaymentResult {
        match strategy {
            PrepaymentStrategy::ReduceTenure => &self.reduce_tenure,
            PrepaymentStrategy::ReduceEmi => &self.reduce_emi,
        }
    }

    /// extra interest saved by choosing the recommended strategy
    pub fn savings_difference(&self) -> Money {
        (self.reduce_tenure.interest_savings - self.reduce_emi.interest_savings).abs()
    }
}

/// run the simulator once per strategy
pub fn compare_strategies(
    terms: &LoanTerms,
    elapsed_periods: u32,
    prepayment_amount: Money,
) -> Result<StrategyComparison> {
    let run = |strategy| {
        simulate_prepayment(
            terms,
            &PrepaymentInput {
                elapsed_periods,
                prepayment_amount,
                strategy,
            },
        )
    };

    Ok(StrategyComparison {
        reduce_tenure: run(PrepaymentStrategy::ReduceTenure)?,
        reduce_emi: run(PrepaymentStrategy::ReduceEmi)?,
    })
}
