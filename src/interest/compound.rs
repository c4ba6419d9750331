use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompoundingFrequency {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    /// number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::SemiAnnual => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }
}

/// engine for compound growth over fractional years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundingEngine {
    pub frequency: CompoundingFrequency,
}

impl CompoundingEngine {
    pub fn new(frequency: CompoundingFrequency) -> Self {
        Self { frequency }
    }

    /// (1 + r/m)^(m * years); annual compounding is (1 + r)^years
    pub fn growth_factor(&self, annual_rate: Rate, years: Decimal) -> Result<Decimal> {
        if annual_rate.is_negative() {
            return Err(AmortizationError::InvalidRate { rate: annual_rate });
        }
        if years <= Decimal::ZERO || annual_rate.is_zero() {
            return Ok(Decimal::ONE);
        }

        let m = Decimal::from(self.frequency.periods_per_year());
        let base = Decimal::ONE + annual_rate.as_decimal() / m;
        let exponent = m * years;

        base.checked_powd(exponent)
            .ok_or_else(|| AmortizationError::CalculationError {
                message: format!("{} ^ {} is not representable", base, exponent),
            })
    }

    /// principal grown for `years`
    pub fn future_value(&self, principal: Money, annual_rate: Rate, years: Decimal) -> Result<Money> {
        let factor = self.growth_factor(annual_rate, years)?;
        Ok(Money::from_decimal(principal.as_decimal() * factor))
    }

    /// growth only, excluding the principal
    pub fn interest_earned(&self, principal: Money, annual_rate: Rate, years: Decimal) -> Result<Money> {
        Ok(self.future_value(principal, annual_rate, years)? - principal)
    }
}
