//! Ticker watchlists for batch analysis.

pub mod csv;

pub use self::csv::{CsvWatchlist, WatchlistError};

use fairval_valuation::{MarketRules, MarketSegment};
use std::collections::HashMap;

/// An ordered set of tickers.
pub trait Watchlist {
    /// All tickers, in watchlist order.
    fn symbols(&self) -> Vec<String>;

    /// Check if a ticker is on the watchlist.
    fn contains(&self, symbol: &str) -> bool {
        let symbol = symbol.to_uppercase();
        self.symbols().iter().any(|s| *s == symbol)
    }

    /// Number of tickers.
    fn size(&self) -> usize {
        self.symbols().len()
    }

    /// Tickers listed in one market segment.
    fn symbols_in_market(&self, rules: &MarketRules, segment: MarketSegment) -> Vec<String> {
        self.symbols()
            .into_iter()
            .filter(|s| rules.segment(s) == segment)
            .collect()
    }

    /// Ticker count per market segment.
    fn market_counts(&self, rules: &MarketRules) -> HashMap<MarketSegment, usize> {
        let mut counts = HashMap::new();
        for symbol in self.symbols() {
            *counts.entry(rules.segment(&symbol)).or_insert(0) += 1;
        }
        counts
    }
}

impl Watchlist for Vec<String> {
    fn symbols(&self) -> Vec<String> {
        self.clone()
    }
}
