//! EV/EBITDA Projection
//!
//! Holds the current EV/EBITDA multiple constant, grows EBITDA one period
//! forward and converts the implied enterprise value into a price per share.
//! This is the primary estimate the classifier bands against the market price.
//!
//! Financial-sector tickers typically report no EBITDA, so absence is the
//! common case here. A zero component is treated the same as a missing one.

use crate::inputs::FundamentalInputs;
use crate::round2;
use crate::traits::{FairValueMethod, MethodKind, StyleMethod};
use serde::{Deserialize, Serialize};

/// Default one-period EBITDA growth rate.
pub const DEFAULT_EV_GROWTH_RATE: f64 = 0.10;

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

/// Projected fair price per share from EV, EBITDA and share count.
///
/// Returns `(fair_price, current_price)`. When any of the three components is
/// absent or zero, both halves are `None`, even if a current price is known.
/// The fair price is not rounded so that banding sees the exact figure.
pub fn estimate_fair_value(
    enterprise_value: Option<f64>,
    ebitda: Option<f64>,
    shares_outstanding: Option<f64>,
    current_price: Option<f64>,
    growth_rate: f64,
) -> (Option<f64>, Option<f64>) {
    let (Some(ev), Some(ebitda), Some(shares)) = (
        present(enterprise_value),
        present(ebitda),
        present(shares_outstanding),
    ) else {
        return (None, None);
    };

    let multiple = ev / ebitda;
    let projected_ebitda = ebitda * (1.0 + growth_rate);
    let projected_ev = projected_ebitda * multiple;
    let fair_price = projected_ev / shares;

    (fair_price.is_finite().then_some(fair_price), current_price)
}

/// Configuration for the EV/EBITDA method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvEbitdaConfig {
    /// EBITDA growth rate applied for one period (default: 0.10)
    pub growth_rate: f64,
}

impl Default for EvEbitdaConfig {
    fn default() -> Self {
        Self {
            growth_rate: DEFAULT_EV_GROWTH_RATE,
        }
    }
}

/// EvEbitdaMethod projects enterprise value forward at a constant multiple
#[derive(Debug, Clone, Default)]
pub struct EvEbitdaMethod {
    config: EvEbitdaConfig,
}

impl EvEbitdaMethod {
    /// Unrounded `(fair_price, current_price)` pair for the classifier.
    pub fn fair_value(&self, inputs: &FundamentalInputs) -> (Option<f64>, Option<f64>) {
        estimate_fair_value(
            inputs.enterprise_value,
            inputs.ebitda,
            inputs.shares_outstanding,
            inputs.current_price,
            self.config.growth_rate,
        )
    }
}

impl FairValueMethod for EvEbitdaMethod {
    fn name(&self) -> &str {
        "ev_ebitda"
    }

    fn kind(&self) -> MethodKind {
        MethodKind::Enterprise
    }

    /// Rounded to cents, matching the figure shown next to the other methods.
    fn estimate(&self, inputs: &FundamentalInputs) -> Option<f64> {
        self.fair_value(inputs).0.map(round2)
    }

    fn required_inputs(&self) -> &[&str] {
        &["enterprise_value", "ebitda", "shares_outstanding"]
    }
}

impl StyleMethod for EvEbitdaMethod {
    type Config = EvEbitdaConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
