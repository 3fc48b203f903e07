//! The market-data seam the analyzer is generic over.

use crate::error::Result;
use crate::yahoo::FundamentalData;
use chrono::{DateTime, Duration, Utc};
use fairval_valuation::PriceHistoryWindow;
use std::fmt;
use std::future::Future;

/// Trailing period of price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookback {
    /// Whole calendar years back from today
    Years(u32),
}

impl Lookback {
    /// Window used for the 3-year high/low and entry/exit band.
    pub const BAND: Self = Self::Years(3);

    /// Preferred window for chart overlays.
    pub const OVERLAY: Self = Self::Years(5);

    /// Start of the window when it ends at `end`.
    pub fn start_from(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Years(years) => end - Duration::days(365 * i64::from(*years)),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(years) => write!(f, "{}y", years),
        }
    }
}

/// Supplies fundamentals snapshots and price history per ticker.
pub trait MarketDataSource: Send + Sync {
    /// Fetch the fundamentals snapshot for a ticker.
    fn fetch_fundamentals(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<FundamentalData>> + Send;

    /// Fetch daily price history over a trailing period. An empty window is a
    /// valid answer.
    fn fetch_history(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> impl Future<Output = Result<PriceHistoryWindow>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_lookback_start() {
        let end = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let start = Lookback::BAND.start_from(end);
        assert_eq!((end - start).num_days(), 1095);
    }

    #[test]
    fn test_display() {
        assert_eq!(Lookback::OVERLAY.to_string(), "5y");
        assert_eq!(Lookback::Years(3).to_string(), "3y");
    }
}
