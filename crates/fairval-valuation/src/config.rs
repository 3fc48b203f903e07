//! Engine-wide valuation configuration.

use crate::inputs::DEFAULT_PE_RATIO;
use crate::methods::dcf::{DEFAULT_DCF_GROWTH_RATE, DEFAULT_DISCOUNT_RATE};
use crate::methods::ev_ebitda::DEFAULT_EV_GROWTH_RATE;
use crate::methods::{DcfConfig, EvEbitdaConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found in a [`ValuationConfig`].
///
/// These are reported, not corrected: the formulas run with the rates as given.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    /// DCF denominator is zero or negative
    #[error(
        "discount rate {discount_rate} does not exceed DCF growth rate {growth_rate}; DCF values will be huge or negative"
    )]
    DegenerateDiscountRate {
        /// DCF growth rate
        growth_rate: f64,
        /// DCF discount rate
        discount_rate: f64,
    },

    /// A rate is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFiniteRate {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Rates and defaults used by the formula library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Earnings growth rate used by DCF (default: 0.08)
    pub dcf_growth_rate: f64,
    /// Discount rate used by DCF (default: 0.10)
    pub discount_rate: f64,
    /// EBITDA growth rate used by the EV/EBITDA projection (default: 0.10)
    pub ev_growth_rate: f64,
    /// P/E multiple assumed when the data source has none (default: 15.0)
    pub default_pe_ratio: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            dcf_growth_rate: DEFAULT_DCF_GROWTH_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            ev_growth_rate: DEFAULT_EV_GROWTH_RATE,
            default_pe_ratio: DEFAULT_PE_RATIO,
        }
    }
}

impl ValuationConfig {
    /// Collect every issue with the configured rates.
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("dcf_growth_rate", self.dcf_growth_rate),
            ("discount_rate", self.discount_rate),
            ("ev_growth_rate", self.ev_growth_rate),
            ("default_pe_ratio", self.default_pe_ratio),
        ] {
            if !value.is_finite() {
                issues.push(ConfigIssue::NonFiniteRate { field, value });
            }
        }

        if self.discount_rate <= self.dcf_growth_rate {
            issues.push(ConfigIssue::DegenerateDiscountRate {
                growth_rate: self.dcf_growth_rate,
                discount_rate: self.discount_rate,
            });
        }

        issues
    }

    /// First issue found, if any.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        self.issues().into_iter().next().map_or(Ok(()), Err)
    }

    /// DCF method configuration.
    pub const fn dcf(&self) -> DcfConfig {
        DcfConfig {
            growth_rate: self.dcf_growth_rate,
            discount_rate: self.discount_rate,
        }
    }

    /// EV/EBITDA method configuration.
    pub const fn ev_ebitda(&self) -> EvEbitdaConfig {
        EvEbitdaConfig {
            growth_rate: self.ev_growth_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValuationConfig::default();
        assert_eq!(config.dcf_growth_rate, 0.08);
        assert_eq!(config.discount_rate, 0.10);
        assert_eq!(config.ev_growth_rate, 0.10);
        assert_eq!(config.default_pe_ratio, 15.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_degenerate_discount_rate_reported() {
        let config = ValuationConfig {
            dcf_growth_rate: 0.12,
            discount_rate: 0.10,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigIssue::DegenerateDiscountRate {
                growth_rate: 0.12,
                discount_rate: 0.10,
            })
        );

        let equal = ValuationConfig {
            dcf_growth_rate: 0.10,
            ..Default::default()
        };
        assert!(equal.validate().is_err());
    }

    #[test]
    fn test_non_finite_rate_reported() {
        let config = ValuationConfig {
            ev_growth_rate: f64::INFINITY,
            ..Default::default()
        };
        let issues = config.issues();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            ConfigIssue::NonFiniteRate {
                field: "ev_growth_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ValuationConfig = serde_json::from_str(r#"{"ev_growth_rate": 0.05}"#).unwrap();
        assert_eq!(config.ev_growth_rate, 0.05);
        assert_eq!(config.discount_rate, 0.10);
    }

    #[test]
    fn test_method_configs() {
        let config = ValuationConfig::default();
        assert_eq!(config.dcf().growth_rate, 0.08);
        assert_eq!(config.ev_ebitda().growth_rate, 0.10);
    }
}
