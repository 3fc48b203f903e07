//! Valuation classifier
//!
//! Turns a primary fair-value estimate and the current price into a
//! [`ValuationRecord`]: market segment, capitalization tier, percent
//! differential, valuation band, entry/exit band and a buy/hold signal.

pub mod band;
pub mod market;
pub mod record;
pub mod tier;

pub use band::{Signal, ValuationBand, undervaluation_pct};
pub use market::{MarketRules, MarketSegment};
pub use record::{ValuationRecord, classify, classify_with_rules};
pub use tier::CapTier;
