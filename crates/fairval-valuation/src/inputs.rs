//! Inputs to the valuation engine.
//!
//! These are immutable snapshots handed over by whatever market-data source the
//! caller uses. Nothing here fetches data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// P/E multiple assumed when the data source has no trailing P/E.
pub const DEFAULT_PE_RATIO: f64 = 15.0;

/// Fundamental fields for a single ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundamentalInputs {
    /// Trailing earnings per share. Zero or negative for loss-making companies.
    pub eps: f64,
    /// Book value per share.
    pub book_value_per_share: f64,
    /// Trailing P/E used by the P/E method.
    pub pe_ratio_hint: f64,
    /// Enterprise value
    pub enterprise_value: Option<f64>,
    /// EBITDA
    pub ebitda: Option<f64>,
    /// Shares outstanding
    pub shares_outstanding: Option<f64>,
    /// Last traded price
    pub current_price: Option<f64>,
}

impl Default for FundamentalInputs {
    fn default() -> Self {
        Self {
            eps: 0.0,
            book_value_per_share: 0.0,
            pe_ratio_hint: DEFAULT_PE_RATIO,
            enterprise_value: None,
            ebitda: None,
            shares_outstanding: None,
            current_price: None,
        }
    }
}

/// Descriptive company metadata used when building a valuation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Display name
    pub name: String,
    /// Market capitalization in the listing currency
    pub market_cap: f64,
    /// Industry label
    pub industry: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "N/A".to_string(),
            market_cap: 0.0,
            industry: "N/A".to_string(),
        }
    }
}

/// One row of daily price history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Session high
    pub high: f64,
    /// Session low
    pub low: f64,
    /// Session close
    pub close: f64,
}

impl PriceBar {
    /// Create a new price bar.
    pub const fn new(date: NaiveDate, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            high,
            low,
            close,
        }
    }
}

/// Trailing window of price bars, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryWindow {
    bars: Vec<PriceBar>,
}

impl PriceHistoryWindow {
    /// Build a window, sorting the bars by date.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { bars }
    }

    /// An empty window.
    pub const fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    /// Bars in date order.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the window has no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Highest `high` in the window, ignoring non-finite values.
    pub fn max_high(&self) -> Option<f64> {
        self.bars
            .iter()
            .map(|b| b.high)
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Lowest `low` in the window, ignoring non-finite values.
    pub fn min_low(&self) -> Option<f64> {
        self.bars
            .iter()
            .map(|b| b.low)
            .filter(|v| v.is_finite())
            .reduce(f64::min)
    }

    /// First and last date covered.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.bars.first()?.date, self.bars.last()?.date))
    }
}

impl From<Vec<PriceBar>> for PriceHistoryWindow {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}
