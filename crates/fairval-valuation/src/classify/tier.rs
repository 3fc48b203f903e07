//! Capitalization tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

const MEGA_CAP: f64 = 200_000_000_000.0;
const LARGE_CAP: f64 = 10_000_000_000.0;
const MID_CAP: f64 = 2_000_000_000.0;

/// Market-capitalization size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CapTier {
    /// Below 2B
    Small,
    /// 2B up to 10B
    Mid,
    /// 10B up to 200B
    Large,
    /// 200B and above
    Mega,
}

impl CapTier {
    /// Tier for a market cap. Each lower bound is inclusive.
    pub fn from_market_cap(market_cap: f64) -> Self {
        if market_cap >= MEGA_CAP {
            Self::Mega
        } else if market_cap >= LARGE_CAP {
            Self::Large
        } else if market_cap >= MID_CAP {
            Self::Mid
        } else {
            Self::Small
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mega => "Mega",
            Self::Large => "Large",
            Self::Mid => "Mid",
            Self::Small => "Small",
        }
    }
}

impl fmt::Display for CapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
