//! Yahoo Finance data providers.

pub mod fundamentals;
pub mod quotes;

pub use fundamentals::{FundamentalData, YahooFundamentalsProvider, parse_quote_summary};
pub use quotes::{YahooQuoteProvider, frame_to_history};

use crate::error::Result;
use crate::source::{Lookback, MarketDataSource};
use fairval_valuation::PriceHistoryWindow;
use std::time::Duration;

/// Quote history and fundamentals from Yahoo Finance behind one source.
#[derive(Debug)]
pub struct YahooSource {
    quotes: YahooQuoteProvider,
    fundamentals: YahooFundamentalsProvider,
}

impl YahooSource {
    /// Create a source with the default 1 req/sec rate limit on each provider.
    pub fn new() -> Result<Self> {
        Ok(Self {
            quotes: YahooQuoteProvider::new()?,
            fundamentals: YahooFundamentalsProvider::new()?,
        })
    }

    /// Create a source with a custom per-provider rate limit.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            quotes: YahooQuoteProvider::with_rate_limit(rate_limit_delay)?,
            fundamentals: YahooFundamentalsProvider::with_rate_limit(rate_limit_delay)?,
        })
    }
}

impl MarketDataSource for YahooSource {
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<FundamentalData> {
        self.fundamentals.fetch_fundamentals(symbol).await
    }

    async fn fetch_history(&self, symbol: &str, lookback: Lookback) -> Result<PriceHistoryWindow> {
        self.quotes.fetch_history(symbol, lookback).await
    }
}
