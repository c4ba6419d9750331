pub mod compound;

use rust_decimal::Decimal;

use crate::decimal::Rate;
use crate::errors::Result;

pub use compound::{CompoundingEngine, CompoundingFrequency};

/// effective annual yield of a nominal rate under the given compounding
pub fn effective_annual_rate(nominal: Rate, frequency: CompoundingFrequency) -> Result<Rate> {
    let factor = CompoundingEngine::new(frequency).growth_factor(nominal, Decimal::ONE)?;
    Ok(Rate::from_decimal(factor - Decimal::ONE))
}
