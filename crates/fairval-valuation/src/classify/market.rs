//! Market segment detection from ticker suffixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing market of a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSegment {
    /// Indian exchanges (NSE, BSE)
    India,
    /// United States, and anything without a recognised suffix
    #[serde(rename = "USA")]
    Usa,
}

impl MarketSegment {
    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::India => "India",
            Self::Usa => "USA",
        }
    }
}

impl fmt::Display for MarketSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered suffix → segment rules with a fallback segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRules {
    rules: Vec<(String, MarketSegment)>,
    fallback: MarketSegment,
}

impl Default for MarketRules {
    /// `.NS` is India, everything else is USA.
    fn default() -> Self {
        Self {
            rules: vec![(".NS".to_string(), MarketSegment::India)],
            fallback: MarketSegment::Usa,
        }
    }
}

impl MarketRules {
    /// Rules with no suffixes, mapping every ticker to `fallback`.
    pub const fn new(fallback: MarketSegment) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Default rules plus the Bombay Stock Exchange `.BO` suffix.
    pub fn extended() -> Self {
        Self::default().with_suffix(".BO", MarketSegment::India)
    }

    /// Append a suffix rule. Earlier rules win.
    pub fn with_suffix(mut self, suffix: &str, segment: MarketSegment) -> Self {
        self.rules.push((suffix.to_uppercase(), segment));
        self
    }

    /// Segment for a ticker. Matching is case-insensitive.
    pub fn segment(&self, ticker: &str) -> MarketSegment {
        let ticker = ticker.to_uppercase();
        self.rules
            .iter()
            .find(|(suffix, _)| ticker.ends_with(suffix.as_str()))
            .map_or(self.fallback, |(_, segment)| *segment)
    }
}
