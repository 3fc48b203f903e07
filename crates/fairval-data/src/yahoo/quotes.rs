//! Quote history fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::source::Lookback;
use chrono::{DateTime, Utc};
use fairval_valuation::{PriceBar, PriceHistoryWindow};
use polars::prelude::*;
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance quote provider with default rate limiting (1 req/sec).
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(1000))
    }

    /// Create a new Yahoo Finance quote provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            rate_limit_delay,
        })
    }

    /// Fetch daily OHLC data for a single symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "AAPL", "INFY.NS")
    /// * `start` - Start date for the data
    /// * `end` - End date for the data
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, timestamp, date, high, low, close.
    /// An empty frame when Yahoo has no rows for the range.
    pub async fn fetch_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        // Validate date range
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        // Validate symbol
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        // Convert chrono DateTime to time::OffsetDateTime
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        tracing::debug!(symbol, rows = quotes.len(), "fetched quote history");

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp as i64).collect();
        let highs: Vec<f64> = quotes.iter().map(|q| q.high).collect();
        let lows: Vec<f64> = quotes.iter().map(|q| q.low).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();

        let mut df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("high".into(), highs).into(),
            Series::new("low".into(), lows).into(),
            Series::new("close".into(), closes).into(),
        ])?;

        let symbol_col: Column = Series::new("symbol".into(), vec![symbol; df.height()]).into();
        df.with_column(symbol_col)?;

        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[
                col("symbol"),
                col("timestamp"),
                col("date"),
                col("high"),
                col("low"),
                col("close"),
            ])
            .collect()?;

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        Ok(df)
    }

    /// Fetch a trailing window of daily bars ending now.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceHistoryWindow> {
        let end = Utc::now();
        let df = self.fetch_quotes(symbol, lookback.start_from(end), end).await?;
        frame_to_history(&df)
    }
}

/// Convert a quote frame (timestamp, high, low, close) into a history window.
///
/// Rows with a null in any of those columns are skipped.
pub fn frame_to_history(df: &DataFrame) -> Result<PriceHistoryWindow> {
    if df.height() == 0 {
        return Ok(PriceHistoryWindow::empty());
    }

    let timestamps = df.column("timestamp")?.as_materialized_series().i64()?;
    let highs = df.column("high")?.as_materialized_series().f64()?;
    let lows = df.column("low")?.as_materialized_series().f64()?;
    let closes = df.column("close")?.as_materialized_series().f64()?;

    let mut bars = Vec::with_capacity(df.height());
    for (((ts, high), low), close) in timestamps
        .into_iter()
        .zip(highs.into_iter())
        .zip(lows.into_iter())
        .zip(closes.into_iter())
    {
        let (Some(ts), Some(high), Some(low), Some(close)) = (ts, high, low, close) else {
            continue;
        };
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| DataError::TimeConversion(format!("timestamp out of range: {}", ts)))?
            .date_naive();
        bars.push(PriceBar::new(date, high, low, close));
    }

    Ok(PriceHistoryWindow::new(bars))
}
