//! Discounted Cash Flow
//!
//! Single-period Gordon-style projection: next year's earnings divided by the
//! spread between the discount rate and the growth rate.

use crate::inputs::FundamentalInputs;
use crate::round2;
use crate::traits::{FairValueMethod, MethodKind, StyleMethod};
use serde::{Deserialize, Serialize};

/// Default earnings growth rate for the DCF method.
pub const DEFAULT_DCF_GROWTH_RATE: f64 = 0.08;

/// Default discount rate for the DCF method.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// DCF fair value: `eps * (1 + g) / (d - g)`, rounded to cents.
///
/// Returns `None` when `eps` is not positive. A discount rate at or below the
/// growth rate is left unguarded and yields a huge or negative value; it is
/// reported with a warning. Only an infinite or NaN result maps to `None`.
pub fn dcf_valuation(eps: f64, growth_rate: f64, discount_rate: f64) -> Option<f64> {
    if eps.is_nan() || eps <= 0.0 {
        return None;
    }

    if discount_rate <= growth_rate {
        tracing::warn!(
            growth_rate,
            discount_rate,
            "DCF discount rate does not exceed growth rate; result is degenerate"
        );
    }

    let next_cash_flow = eps * (1.0 + growth_rate);
    let value = next_cash_flow / (discount_rate - growth_rate);

    value.is_finite().then(|| round2(value))
}

/// Configuration for the DCF method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfConfig {
    /// Earnings growth rate (default: 0.08)
    pub growth_rate: f64,
    /// Discount rate (default: 0.10)
    pub discount_rate: f64,
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            growth_rate: DEFAULT_DCF_GROWTH_RATE,
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

/// DcfMethod values a share from trailing EPS
#[derive(Debug, Clone, Default)]
pub struct DcfMethod {
    config: DcfConfig,
}

impl FairValueMethod for DcfMethod {
    fn name(&self) -> &str {
        "dcf"
    }

    fn kind(&self) -> MethodKind {
        MethodKind::Earnings
    }

    fn estimate(&self, inputs: &FundamentalInputs) -> Option<f64> {
        dcf_valuation(inputs.eps, self.config.growth_rate, self.config.discount_rate)
    }

    fn required_inputs(&self) -> &[&str] {
        &["eps"]
    }
}

impl StyleMethod for DcfMethod {
    type Config = DcfConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
