//! The four fair-value estimates for one ticker.

use crate::config::ValuationConfig;
use crate::inputs::FundamentalInputs;
use crate::methods::{DcfMethod, EvEbitdaMethod, GrahamMethod, PeMethod};
use crate::traits::{FairValueMethod, StyleMethod};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which method produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// EV/EBITDA projection
    Ev,
    /// Discounted cash flow
    Dcf,
    /// Graham number
    Graham,
    /// P/E multiple
    Pe,
}

impl Method {
    /// All methods in canonical order (EV, DCF, Graham, PE).
    pub const ALL: [Self; 4] = [Self::Ev, Self::Dcf, Self::Graham, Self::Pe];

    /// Short label used in tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ev => "EV",
            Self::Dcf => "DCF",
            Self::Graham => "Graham",
            Self::Pe => "PE",
        }
    }

    /// Registry name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ev => "ev_ebitda",
            Self::Dcf => "dcf",
            Self::Graham => "graham",
            Self::Pe => "pe",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single tagged estimate. `None` means the method had no valid inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairValueEstimate {
    /// Producing method
    pub method: Method,
    /// Fair value per share, if defined
    pub value: Option<f64>,
}

/// All four estimates for a ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationEstimates {
    /// EV/EBITDA projection, rounded to cents
    pub ev: Option<f64>,
    /// Discounted cash flow
    pub dcf: Option<f64>,
    /// Graham number
    pub graham: Option<f64>,
    /// P/E multiple
    pub pe: Option<f64>,
}

impl ValuationEstimates {
    /// Estimate for one method.
    pub const fn get(&self, method: Method) -> Option<f64> {
        match method {
            Method::Ev => self.ev,
            Method::Dcf => self.dcf,
            Method::Graham => self.graham,
            Method::Pe => self.pe,
        }
    }

    /// Tagged estimates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = FairValueEstimate> + '_ {
        Method::ALL.into_iter().map(|method| FairValueEstimate {
            method,
            value: self.get(method),
        })
    }

    /// Whether every method produced a value.
    pub fn all_defined(&self) -> bool {
        self.iter().all(|e| e.value.is_some())
    }
}

/// Run all four methods over one snapshot.
pub fn compute_all_estimates(
    inputs: &FundamentalInputs,
    config: &ValuationConfig,
) -> ValuationEstimates {
    let estimates = ValuationEstimates {
        ev: EvEbitdaMethod::with_config(config.ev_ebitda()).estimate(inputs),
        dcf: DcfMethod::with_config(config.dcf()).estimate(inputs),
        graham: GrahamMethod::default().estimate(inputs),
        pe: PeMethod::default().estimate(inputs),
    };

    tracing::debug!(
        ev = ?estimates.ev,
        dcf = ?estimates.dcf,
        graham = ?estimates.graham,
        pe = ?estimates.pe,
        "computed fair-value estimates"
    );

    estimates
}
