use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::days_between;
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::events::{Event, EventStore};
use crate::interest::{CompoundingEngine, CompoundingFrequency};

/// average year length used to turn elapsed days into years
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// maturity value of a deposit: `principal * (1 + rate)^(days / 365.25)`
///
/// An end date before the start date counts as zero elapsed days and returns
/// the principal unchanged.
pub fn calculate_maturity_amount(
    principal: Money,
    annual_rate: Rate,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Money> {
    let terms = FdTerms {
        principal,
        annual_rate,
        start_date,
        end_date,
        compounding: CompoundingFrequency::Annual,
    };
    Ok(terms.maturity()?.maturity_amount)
}

/// fixed deposit parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FdTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

/// computed value of a deposit over some span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityResult {
    pub principal: Money,
    pub maturity_amount: Money,
    pub interest_earned: Money,
    pub elapsed_days: u32,
    pub years: Decimal,
    /// the end date preceded the start date and was treated as zero days
    pub date_range_clamped: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl MaturityResult {
    /// the data error behind a clamped range, for callers that want to surface it
    pub fn date_range_error(&self) -> Option<AmortizationError> {
        self.date_range_clamped.then_some(AmortizationError::InvalidDateRange {
            start: self.start_date,
            end: self.end_date,
        })
    }
}

impl FdTerms {
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(AmortizationError::InvalidPrincipal {
                principal: self.principal,
            });
        }
        if self.annual_rate.is_negative() {
            return Err(AmortizationError::InvalidRate {
                rate: self.annual_rate,
            });
        }
        Ok(())
    }

    /// value at the end date
    pub fn maturity(&self) -> Result<MaturityResult> {
        self.value_between(self.start_date, self.end_date)
    }

    /// accrued value on `as_of`, capped at the end date
    pub fn value_as_of(&self, as_of: NaiveDate) -> Result<MaturityResult> {
        let until = if as_of < self.start_date {
            self.start_date
        } else {
            as_of.min(self.end_date)
        };
        let mut result = self.value_between(self.start_date, until)?;
        // an inverted deposit range is a data problem whatever the as-of date
        result.date_range_clamped |= self.end_date < self.start_date;
        Ok(result)
    }

    /// calendar days left until maturity, zero once matured
    pub fn days_to_maturity(&self, as_of: NaiveDate) -> u32 {
        days_between(as_of, self.end_date).max(0) as u32
    }

    pub fn is_matured(&self, as_of: NaiveDate) -> bool {
        as_of >= self.end_date
    }

    fn value_between(&self, start: NaiveDate, end: NaiveDate) -> Result<MaturityResult> {
        self.validate()?;

        let raw_days = days_between(start, end);
        let elapsed_days = raw_days.max(0) as u32;
        let years = Decimal::from(elapsed_days) / DAYS_PER_YEAR;

        let engine = CompoundingEngine::new(self.compounding);
        let maturity_amount = engine.future_value(self.principal, self.annual_rate, years)?;

        Ok(MaturityResult {
            principal: self.principal,
            maturity_amount,
            interest_earned: maturity_amount - self.principal,
            elapsed_days,
            years,
            date_range_clamped: raw_days < 0,
            start_date: start,
            end_date: end,
        })
    }
}

/// a tracked deposit
#[derive(Debug)]
pub struct FixedDeposit {
    pub id: Uuid,
    pub name: String,
    pub terms: FdTerms,
    pub events: EventStore,
}

impl FixedDeposit {
    pub fn new(name: impl Into<String>, terms: FdTerms) -> Result<Self> {
        terms.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            terms,
            events: EventStore::new(),
        })
    }

    /// current and maturity value, reading "today" once from the provider
    pub fn valuation(&mut self, time_provider: &SafeTimeProvider) -> Result<DepositValuation> {
        let today = time_provider.now().date_naive();

        let current = self.terms.value_as_of(today)?;
        let maturity = self.terms.maturity()?;

        self.events.emit(Event::DepositValued {
            deposit_id: self.id,
            as_of: today,
            current_value: current.maturity_amount,
            maturity_amount: maturity.maturity_amount,
            date_range_clamped: maturity.date_range_clamped,
        });

        Ok(DepositValuation {
            as_of: today,
            current,
            maturity,
            days_to_maturity: self.terms.days_to_maturity(today),
            matured: self.terms.is_matured(today),
        })
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}

/// deposit figures for one dashboard date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositValuation {
    pub as_of: NaiveDate,
    pub current: MaturityResult,
    pub maturity: MaturityResult,
    pub days_to_maturity: u32,
    pub matured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn one_year_fd() -> FdTerms {
        FdTerms {
            principal: Money::from_major(100_000),
            annual_rate: Rate::from_percentage(7),
            start_date: date(2023, 1, 1),
            end_date: date(2024, 1, 1),
            compounding: CompoundingFrequency::Annual,
        }
    }

    /// 100000 at 7% for 2023-01-01..2024-01-01; the formula gives 106995.045,
    /// not the rounder 106976 sometimes quoted for this deposit
    #[test]
    fn test_reference_maturity() {
        let amount = calculate_maturity_amount(
            Money::from_major(100_000),
            Rate::from_percentage(7),
            date(2023, 1, 1),
            date(2024, 1, 1),
        )
        .unwrap();

        // 365 days is 0.99932 of a 365.25-day year
        let expected = Money::from_str_exact("106995.045").unwrap();
        assert!(amount.approx_eq(expected, Money::from_str_exact("0.01").unwrap()));
    }

    #[test]
    fn test_maturity_details() {
        let result = one_year_fd().maturity().unwrap();
        assert_eq!(result.elapsed_days, 365);
        assert_eq!(result.years, Decimal::from(365) / DAYS_PER_YEAR);
        assert_eq!(result.interest_earned, result.maturity_amount - result.principal);
        assert!(!result.date_range_clamped);
        assert!(result.date_range_error().is_none());
    }

    #[test]
    fn test_inverted_range_returns_principal() {
        let amount = calculate_maturity_amount(
            Money::from_major(50_000),
            Rate::from_percentage(7),
            date(2024, 1, 1),
            date(2023, 1, 1),
        )
        .unwrap();
        assert_eq!(amount, Money::from_major(50_000));

        let mut terms = one_year_fd();
        terms.end_date = date(2022, 6, 1);
        let result = terms.maturity().unwrap();
        assert!(result.date_range_clamped);
        assert_eq!(result.elapsed_days, 0);
        assert!(matches!(
            result.date_range_error(),
            Some(AmortizationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_same_day_deposit() {
        let mut terms = one_year_fd();
        terms.end_date = terms.start_date;
        let result = terms.maturity().unwrap();
        assert_eq!(result.maturity_amount, terms.principal);
        assert!(!result.date_range_clamped);
    }

    #[test]
    fn test_invalid_deposit_inputs() {
        let mut terms = one_year_fd();
        terms.principal = Money::ZERO;
        assert!(matches!(terms.maturity(), Err(AmortizationError::InvalidPrincipal { .. })));

        let mut terms = one_year_fd();
        terms.annual_rate = Rate::from_decimal(dec!(-0.07));
        assert!(matches!(terms.maturity(), Err(AmortizationError::InvalidRate { .. })));
    }

    #[test]
    fn test_value_as_of_is_capped() {
        let terms = one_year_fd();

        let before = terms.value_as_of(date(2022, 12, 1)).unwrap();
        assert_eq!(before.maturity_amount, terms.principal);

        let midway = terms.value_as_of(date(2023, 7, 1)).unwrap();
        assert!(midway.maturity_amount > terms.principal);
        assert!(midway.maturity_amount < terms.maturity().unwrap().maturity_amount);

        let after = terms.value_as_of(date(2025, 1, 1)).unwrap();
        assert_eq!(after.maturity_amount, terms.maturity().unwrap().maturity_amount);
    }

    #[test]
    fn test_quarterly_deposit_earns_more() {
        let annual = one_year_fd().maturity().unwrap();
        let mut quarterly_terms = one_year_fd();
        quarterly_terms.compounding = CompoundingFrequency::Quarterly;
        let quarterly = quarterly_terms.maturity().unwrap();
        assert!(quarterly.maturity_amount > annual.maturity_amount);
    }

    #[test]
    fn test_days_to_maturity() {
        let terms = one_year_fd();
        assert_eq!(terms.days_to_maturity(date(2023, 12, 1)), 31);
        assert_eq!(terms.days_to_maturity(date(2024, 6, 1)), 0);
        assert!(terms.is_matured(date(2024, 1, 1)));
        assert!(!terms.is_matured(date(2023, 12, 31)));
    }

    #[test]
    fn test_valuation_reads_time_once_and_records_event() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2023, 7, 1, 9, 30, 0).unwrap(),
        ));
        let mut deposit = FixedDeposit::new("SBI 1y FD", one_year_fd()).unwrap();

        let valuation = deposit.valuation(&time).unwrap();
        assert_eq!(valuation.as_of, date(2023, 7, 1));
        assert_eq!(valuation.days_to_maturity, 184);
        assert!(!valuation.matured);
        assert!(valuation.current.maturity_amount < valuation.maturity.maturity_amount);

        let events = deposit.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::DepositValued { .. }));
    }

    #[test]
    fn test_deposit_json_defaults_compounding() {
        let json = r#"{
            "principal": "100000",
            "annual_rate": "0.07",
            "start_date": "2023-01-01",
            "end_date": "2024-01-01"
        }"#;
        let terms: FdTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.compounding, CompoundingFrequency::Annual);
        assert_eq!(terms, one_year_fd());
    }
}
