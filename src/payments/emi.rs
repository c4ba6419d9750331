use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};

/// longest tenure any calculation accepts (100 years); builders may set a lower ceiling
pub const MAX_TENURE_MONTHS: u32 = 1_200;

/// check the three loan inputs every formula depends on
pub fn validate_loan_inputs(principal: Money, annual_rate: Rate, tenure_months: u32) -> Result<()> {
    if !principal.is_positive() {
        return Err(AmortizationError::InvalidPrincipal { principal });
    }
    if annual_rate.is_negative() {
        return Err(AmortizationError::InvalidRate { rate: annual_rate });
    }
    if tenure_months == 0 || tenure_months > MAX_TENURE_MONTHS {
        return Err(AmortizationError::InvalidTenure { months: tenure_months });
    }
    Ok(())
}

/// fixed monthly installment for a reducing-balance loan
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r the monthly rate.
/// A zero rate degenerates to `P / n`.
pub fn calculate_emi(principal: Money, annual_rate: Rate, tenure_months: u32) -> Result<Money> {
    validate_loan_inputs(principal, annual_rate, tenure_months)?;

    let r = annual_rate.monthly_rate();
    if r.is_zero() {
        return Ok(principal / Decimal::from(tenure_months));
    }

    let compound = growth_factor(r, tenure_months)?;
    let numerator = principal.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(AmortizationError::CalculationError {
            message: format!("rate {} too small to amortize over {} months", annual_rate, tenure_months),
        });
    }

    Ok(Money::from_decimal(numerator / denominator))
}

/// (1 + r)^n
pub(crate) fn growth_factor(r: Decimal, periods: u32) -> Result<Decimal> {
    (Decimal::ONE + r)
        .checked_powu(periods as u64)
        .ok_or_else(|| AmortizationError::CalculationError {
            message: format!("(1 + {}) ^ {} overflows", r, periods),
        })
}

/// principal still owed after `periods` installments of `emi`
///
/// Closed form `P(1+r)^k - EMI((1+r)^k - 1)/r`, or `P - EMI*k` at zero rate.
/// Never negative.
pub fn outstanding_after(principal: Money, annual_rate: Rate, emi: Money, periods: u32) -> Result<Money> {
    if periods == 0 {
        return Ok(principal);
    }

    let r = annual_rate.monthly_rate();
    if r.is_zero() {
        return Ok((principal - emi * Decimal::from(periods)).max(Money::ZERO));
    }

    let compound = growth_factor(r, periods)?;
    let balance = principal.as_decimal() * compound - emi.as_decimal() * (compound - Decimal::ONE) / r;

    Ok(Money::from_decimal(balance).max(Money::ZERO))
}

/// smallest number of installments of `emi` that retires `balance`
///
/// `ceil(-ln(1 - r*B/EMI) / ln(1 + r))`, or `ceil(B / EMI)` at zero rate.
pub fn remaining_tenure_for_emi(balance: Money, annual_rate: Rate, emi: Money) -> Result<u32> {
    if !balance.is_positive() {
        return Ok(0);
    }
    if !emi.is_positive() {
        return Err(AmortizationError::CalculationError {
            message: format!("installment {} cannot retire balance {}", emi, balance),
        });
    }

    let r = annual_rate.monthly_rate();
    let periods = if r.is_zero() {
        balance.as_decimal() / emi.as_decimal()
    } else {
        let coverage = r * balance.as_decimal() / emi.as_decimal();
        if coverage >= Decimal::ONE {
            return Err(AmortizationError::CalculationError {
                message: format!(
                    "installment {} does not cover monthly interest on {}",
                    emi, balance
                ),
            });
        }

        let numerator = (Decimal::ONE - coverage).checked_ln();
        let denominator = (Decimal::ONE + r).checked_ln();
        match (numerator, denominator) {
            (Some(num), Some(den)) if !den.is_zero() => -num / den,
            _ => {
                return Err(AmortizationError::CalculationError {
                    message: format!("logarithm undefined for rate {}", annual_rate),
                })
            }
        }
    };

    // series approximations of ln leave noise in the last digits
    periods
        .round_dp(4)
        .ceil()
        .to_u32()
        .ok_or_else(|| AmortizationError::CalculationError {
            message: format!("tenure {} out of range", periods),
        })
}

/// total cash needed to retire `balance` over `periods` installments of `emi`,
/// where the final installment is only the residual owed
pub fn payoff_cash_flow(balance: Money, annual_rate: Rate, emi: Money, periods: u32) -> Result<Money> {
    if periods == 0 {
        return Ok(Money::ZERO);
    }

    let before_last = outstanding_after(balance, annual_rate, emi, periods - 1)?;
    let last = before_last + before_last * annual_rate.monthly_rate();

    Ok(emi * Decimal::from(periods - 1) + last)
}
