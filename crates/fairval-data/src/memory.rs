//! In-memory market data, for tests and offline runs.

use crate::error::{DataError, Result};
use crate::source::{Lookback, MarketDataSource};
use crate::yahoo::FundamentalData;
use fairval_valuation::PriceHistoryWindow;
use std::collections::HashMap;

/// Serves canned snapshots keyed by upper-cased symbol.
///
/// Unknown symbols fail with [`DataError::MissingData`]. History for a
/// lookback that was never inserted is an empty window.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    fundamentals: HashMap<String, FundamentalData>,
    history: HashMap<(String, Lookback), PriceHistoryWindow>,
}

impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fundamentals snapshot, keyed by its symbol.
    pub fn with_fundamentals(mut self, data: FundamentalData) -> Self {
        self.fundamentals.insert(data.symbol.to_uppercase(), data);
        self
    }

    /// Add price history for a symbol and lookback.
    pub fn with_history(
        mut self,
        symbol: &str,
        lookback: Lookback,
        history: PriceHistoryWindow,
    ) -> Self {
        self.history.insert((symbol.to_uppercase(), lookback), history);
        self
    }

    /// Symbols with a fundamentals snapshot.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.fundamentals.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}

impl MarketDataSource for InMemorySource {
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<FundamentalData> {
        self.fundamentals
            .get(&symbol.to_uppercase())
            .cloned()
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "no fundamentals loaded".to_string(),
            })
    }

    async fn fetch_history(&self, symbol: &str, lookback: Lookback) -> Result<PriceHistoryWindow> {
        Ok(self
            .history
            .get(&(symbol.to_uppercase(), lookback))
            .cloned()
            .unwrap_or_default())
    }
}
