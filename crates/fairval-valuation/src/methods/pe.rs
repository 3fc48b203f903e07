//! Price/Earnings Multiple
//!
//! Capitalizes trailing earnings at a P/E multiple, by default the stock's own
//! trailing P/E.

use crate::inputs::FundamentalInputs;
use crate::round2;
use crate::traits::{FairValueMethod, MethodKind, StyleMethod};
use serde::{Deserialize, Serialize};

/// `eps * pe_ratio`, rounded to cents. `None` when `eps` is not positive.
pub fn pe_valuation(eps: f64, pe_ratio: f64) -> Option<f64> {
    if eps.is_nan() || eps <= 0.0 {
        return None;
    }

    let value = eps * pe_ratio;
    value.is_finite().then(|| round2(value))
}

/// Configuration for the P/E method
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeConfig {
    /// Fixed multiple to use instead of the stock's trailing P/E (default: None)
    pub pe_override: Option<f64>,
}

/// PeMethod values a share as a multiple of its earnings
#[derive(Debug, Clone, Default)]
pub struct PeMethod {
    config: PeConfig,
}

impl FairValueMethod for PeMethod {
    fn name(&self) -> &str {
        "pe"
    }

    fn kind(&self) -> MethodKind {
        MethodKind::Earnings
    }

    fn estimate(&self, inputs: &FundamentalInputs) -> Option<f64> {
        let multiple = self.config.pe_override.unwrap_or(inputs.pe_ratio_hint);
        pe_valuation(inputs.eps, multiple)
    }

    fn required_inputs(&self) -> &[&str] {
        &["eps", "pe_ratio_hint"]
    }
}

impl StyleMethod for PeMethod {
    type Config = PeConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(8.0, 15.0, 120.0)]
    #[case(8.0, 20.0, 160.0)]
    #[case(1.234, 15.0, 18.51)]
    fn test_values(#[case] eps: f64, #[case] pe: f64, #[case] expected: f64) {
        assert_eq!(pe_valuation(eps, pe), Some(expected));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-8.0)]
    fn test_non_positive_eps(#[case] eps: f64) {
        assert_eq!(pe_valuation(eps, 15.0), None);
    }

    #[test]
    fn test_method_reads_hint_or_override() {
        let inputs = FundamentalInputs {
            eps: 8.0,
            pe_ratio_hint: 20.0,
            ..Default::default()
        };

        assert_eq!(PeMethod::default().estimate(&inputs), Some(160.0));

        let fixed = PeMethod::with_config(PeConfig {
            pe_override: Some(15.0),
        });
        assert_eq!(fixed.estimate(&inputs), Some(120.0));
    }
}
