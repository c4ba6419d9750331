use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmortizationError {
    #[error("invalid principal: {principal} (must be greater than zero)")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate} (must not be negative)")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid tenure: {months} months (must be at least one month)")]
    InvalidTenure {
        months: u32,
    },

    #[error("invalid prepayment: {reason}")]
    InvalidPrepayment {
        reason: String,
    },

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, AmortizationError>;
