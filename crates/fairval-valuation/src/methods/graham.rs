//! Graham Number
//!
//! Benjamin Graham's conservative ceiling on what a defensive investor should
//! pay: `sqrt(22.5 * EPS * BVPS)`, where 22.5 is a P/E of 15 times a P/B of 1.5.

use crate::inputs::FundamentalInputs;
use crate::round2;
use crate::traits::{FairValueMethod, MethodKind, StyleMethod};
use serde::{Deserialize, Serialize};

/// Product of the maximum P/E (15) and maximum P/B (1.5).
pub const GRAHAM_MULTIPLIER: f64 = 22.5;

/// Graham number for the given EPS and book value per share, rounded to cents.
///
/// Both inputs must be positive so the radicand cannot go negative.
pub fn graham_valuation(eps: f64, book_value_per_share: f64) -> Option<f64> {
    graham_with_multiplier(eps, book_value_per_share, GRAHAM_MULTIPLIER)
}

fn graham_with_multiplier(eps: f64, book_value_per_share: f64, multiplier: f64) -> Option<f64> {
    if eps.is_nan() || eps <= 0.0 || book_value_per_share.is_nan() || book_value_per_share <= 0.0 {
        return None;
    }

    let value = (multiplier * eps * book_value_per_share).sqrt();
    value.is_finite().then(|| round2(value))
}

/// Configuration for the Graham method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahamConfig {
    /// Radicand multiplier (default: 22.5)
    pub multiplier: f64,
}

impl Default for GrahamConfig {
    fn default() -> Self {
        Self {
            multiplier: GRAHAM_MULTIPLIER,
        }
    }
}

/// GrahamMethod values a share from earnings and book value
#[derive(Debug, Clone, Default)]
pub struct GrahamMethod {
    config: GrahamConfig,
}

impl FairValueMethod for GrahamMethod {
    fn name(&self) -> &str {
        "graham"
    }

    fn kind(&self) -> MethodKind {
        MethodKind::Asset
    }

    fn estimate(&self, inputs: &FundamentalInputs) -> Option<f64> {
        graham_with_multiplier(
            inputs.eps,
            inputs.book_value_per_share,
            self.config.multiplier,
        )
    }

    fn required_inputs(&self) -> &[&str] {
        &["eps", "book_value_per_share"]
    }
}

impl StyleMethod for GrahamMethod {
    type Config = GrahamConfig;

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
    #[case(5.0, 40.0, 67.08)]
    #[case(2.0, 10.0, 21.21)]
    #[case(1.0, 1.0, 4.74)]
    #[case(10.0, 22.5, 71.15)]
    fn test_hand_computed(#[case] eps: f64, #[case] bvps: f64, #[case] expected: f64) {
        assert_eq!(graham_valuation(eps, bvps), Some(expected));
    }

    #[rstest]
    #[case(0.0, 40.0)]
    #[case(-5.0, 40.0)]
    #[case(5.0, 0.0)]
    #[case(5.0, -40.0)]
    #[case(-5.0, -40.0)]
    fn test_non_positive_inputs(#[case] eps: f64, #[case] bvps: f64) {
        assert_eq!(graham_valuation(eps, bvps), None);
    }

    #[test]
    fn test_method() {
        let method = GrahamMethod::default();
        assert_eq!(method.name(), "graham");
        assert_eq!(method.required_inputs(), &["eps", "book_value_per_share"]);

        let inputs = FundamentalInputs {
            eps: 5.0,
            book_value_per_share: 40.0,
            ..Default::default()
        };
        assert_eq!(method.estimate(&inputs), Some(67.08));
        assert_eq!(method.config().multiplier, 22.5);
    }
}
