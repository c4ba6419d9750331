use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::payments::MAX_TENURE_MONTHS;

/// engine-wide policy knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// relative gap tolerated between stored and theoretical outstanding balance
    pub reconciliation_tolerance: Rate,
    /// absolute gap treated as rounding noise (one currency unit)
    pub rounding_tolerance: Money,
    /// decimal places used when presenting amounts
    pub display_decimal_places: u32,
    /// longest tenure accepted when building loan records
    pub max_tenure_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reconciliation_tolerance: Rate::from_percentage(5),
            rounding_tolerance: Money::ONE,
            display_decimal_places: 2,
            max_tenure_months: 480,
        }
    }
}

impl EngineConfig {
    /// tighter reconciliation for callers with an authoritative ledger
    pub fn strict() -> Self {
        Self {
            reconciliation_tolerance: Rate::from_percentage(1),
            rounding_tolerance: Money::from_decimal(dec!(0.01)),
            ..Self::default()
        }
    }

    /// parse from json, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json).map_err(|e| {
            AmortizationError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let tolerance = self.reconciliation_tolerance.as_decimal();
        if tolerance < Decimal::ZERO || tolerance >= Decimal::ONE {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!(
                    "reconciliation tolerance must be within [0%, 100%), got {}",
                    self.reconciliation_tolerance
                ),
            });
        }

        if self.rounding_tolerance.is_negative() {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!(
                    "rounding tolerance must not be negative, got {}",
                    self.rounding_tolerance
                ),
            });
        }

        if self.display_decimal_places > 8 {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!(
                    "display precision above 8 places is not representable, got {}",
                    self.display_decimal_places
                ),
            });
        }

        if self.max_tenure_months == 0 || self.max_tenure_months > MAX_TENURE_MONTHS {
            return Err(AmortizationError::InvalidConfiguration {
                message: format!(
                    "max tenure must be within 1..={} months, got {}",
                    MAX_TENURE_MONTHS, self.max_tenure_months
                ),
            });
        }

        Ok(())
    }

    /// round an amount for display
    pub fn present(&self, amount: Money) -> Money {
        amount.round_dp(self.display_decimal_places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reconciliation_tolerance, Rate::from_percentage(5));
        assert!(EngineConfig::strict().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "display_decimal_places": 0 }"#).unwrap();
        assert_eq!(config.display_decimal_places, 0);
        assert_eq!(config.max_tenure_months, 480);
        assert_eq!(config.present(Money::from_str_exact("10.6").unwrap()), Money::from_major(11));
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = EngineConfig::from_json(r#"{ "reconciliation_tolerance": "1.5" }"#).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfiguration { .. }));

        let err = EngineConfig::from_json(r#"{ "max_tenure_months": 5000 }"#).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfiguration { .. }));

        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = EngineConfig::strict();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
