#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod combine;
pub mod config;
pub mod estimates;
pub mod inputs;
pub mod methods;
pub mod price_band;
pub mod registry;
pub mod traits;

// Re-export common types
pub use classify::{CapTier, MarketRules, MarketSegment, Signal, ValuationBand, ValuationRecord};
pub use combine::{WeightSet, WeightSetParseError, combine};
pub use config::{ConfigIssue, ValuationConfig};
pub use estimates::{FairValueEstimate, Method, ValuationEstimates, compute_all_estimates};
pub use inputs::{CompanyProfile, FundamentalInputs, PriceBar, PriceHistoryWindow};
pub use price_band::{PriceBand, estimate_price_band};
pub use traits::{FairValueMethod, MethodKind, StyleMethod};

// Re-export registry types for convenience
pub use registry::{MethodInfo, available_methods, get_method_info};

/// Round to two decimal places, the precision of every currency figure we emit.
///
/// Rounds the exact binary value half-to-even, so `4468.285` (stored just
/// below the tie) becomes `4468.28`. Scaling by 100 first would push it over
/// the tie and round it up.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
