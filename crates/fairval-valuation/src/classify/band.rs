//! Valuation bands and the buy/hold signal.
//!
//! The threshold table is evaluated top to bottom, first match wins:
//!
//! | Condition                          | Band          |
//! |------------------------------------|---------------|
//! | fair value < 0 or differential < 5 | Over Valued   |
//! | differential > 30                  | Deep Discount |
//! | differential > 20                  | High Value    |
//! | differential > 18                  | Undervalued   |
//! | otherwise                          | Fair/Premium  |
//!
//! Differentials from 5 up to and including 18 land in Fair/Premium.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percent by which `fair_value` exceeds `current_price`, relative to the price.
///
/// `None` when the price is zero or the result is not finite.
pub fn undervaluation_pct(fair_value: f64, current_price: f64) -> Option<f64> {
    if current_price == 0.0 {
        return None;
    }
    let pct = (fair_value - current_price) / current_price * 100.0;
    pct.is_finite().then_some(pct)
}

/// Discrete valuation classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationBand {
    /// Trading above, or less than 5% below, fair value
    #[serde(rename = "Over Valued")]
    OverValued,
    /// More than 30% upside
    #[serde(rename = "Deep Discount")]
    DeepDiscount,
    /// More than 20% upside
    #[serde(rename = "High Value")]
    HighValue,
    /// More than 18% upside
    #[serde(rename = "Undervalued")]
    Undervalued,
    /// Everything else
    #[serde(rename = "Fair/Premium")]
    FairPremium,
}

impl ValuationBand {
    /// Band for a fair value and its percent differential to the current price.
    pub fn classify(fair_value: f64, undervaluation_pct: f64) -> Self {
        if fair_value < 0.0 || undervaluation_pct < 5.0 {
            Self::OverValued
        } else if undervaluation_pct > 30.0 {
            Self::DeepDiscount
        } else if undervaluation_pct > 20.0 {
            Self::HighValue
        } else if undervaluation_pct > 18.0 {
            Self::Undervalued
        } else {
            Self::FairPremium
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OverValued => "Over Valued",
            Self::DeepDiscount => "Deep Discount",
            Self::HighValue => "High Value",
            Self::Undervalued => "Undervalued",
            Self::FairPremium => "Fair/Premium",
        }
    }
}

impl fmt::Display for ValuationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    /// Fair value above the current price
    Buy,
    /// Fair value at or below the current price
    #[serde(rename = "Hold/Sell")]
    HoldSell,
}

impl Signal {
    /// Buy when the fair value strictly exceeds the price.
    pub fn from_prices(fair_value: f64, current_price: f64) -> Self {
        if fair_value > current_price {
            Self::Buy
        } else {
            Self::HoldSell
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::HoldSell => "Hold/Sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
