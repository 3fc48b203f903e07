//! Fundamental data fetching from Yahoo Finance.
//!
//! Reads the quoteSummary endpoint, which nests every numeric field as
//! `{"raw": 123.4, "fmt": "123.40"}` under one of several modules. Fields the
//! company does not report come back as `{}` or are omitted entirely.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// quoteSummary base URL
const QUOTE_SUMMARY_BASE_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Modules requested from quoteSummary
const MODULES: &str = "price,financialData,defaultKeyStatistics,summaryDetail,assetProfile";

/// Browser-like user agent; Yahoo rejects obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Default rate limit: 1 request per second
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(1000);

/// Company fundamental data, exactly as reported. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalData {
    /// Stock symbol
    pub symbol: String,
    /// Short display name
    pub short_name: Option<String>,
    /// Industry
    pub industry: Option<String>,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Enterprise value
    pub enterprise_value: Option<f64>,
    /// EBITDA (TTM)
    pub ebitda: Option<f64>,
    /// Shares outstanding
    pub shares_outstanding: Option<f64>,
    /// Current price
    pub current_price: Option<f64>,
    /// Trailing EPS
    pub trailing_eps: Option<f64>,
    /// Book value per share
    pub book_value: Option<f64>,
    /// Trailing P/E ratio
    pub trailing_pe: Option<f64>,
}

impl FundamentalData {
    /// An empty snapshot for a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

/// `module.field.raw` as a number.
fn raw(result: &Value, module: &str, field: &str) -> Option<f64> {
    result.get(module)?.get(field)?.get("raw")?.as_f64()
}

/// `module.field` as a non-empty string.
fn text(result: &Value, module: &str, field: &str) -> Option<String> {
    result
        .get(module)?
        .get(field)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a quoteSummary response body.
///
/// # Errors
/// `DataError::YahooApi` when Yahoo reports an error, `DataError::MissingData`
/// when the result array is empty.
pub fn parse_quote_summary(symbol: &str, body: &Value) -> Result<FundamentalData> {
    let summary = body
        .get("quoteSummary")
        .ok_or_else(|| DataError::Parse("missing quoteSummary object".to_string()))?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(DataError::YahooApi(format!("{}: {}", symbol, description)));
    }

    let result = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
        .ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "empty quoteSummary result".to_string(),
        })?;

    Ok(FundamentalData {
        symbol: symbol.to_string(),
        short_name: text(result, "price", "shortName"),
        industry: text(result, "assetProfile", "industry"),
        market_cap: raw(result, "price", "marketCap")
            .or_else(|| raw(result, "summaryDetail", "marketCap")),
        enterprise_value: raw(result, "defaultKeyStatistics", "enterpriseValue"),
        ebitda: raw(result, "financialData", "ebitda"),
        shares_outstanding: raw(result, "defaultKeyStatistics", "sharesOutstanding"),
        current_price: raw(result, "financialData", "currentPrice"),
        trailing_eps: raw(result, "defaultKeyStatistics", "trailingEps"),
        book_value: raw(result, "defaultKeyStatistics", "bookValue"),
        trailing_pe: raw(result, "summaryDetail", "trailingPE"),
    })
}

/// Minimum spacing between requests
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// Yahoo Finance fundamentals provider.
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl std::fmt::Debug for YahooFundamentalsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooFundamentalsProvider")
            .finish_non_exhaustive()
    }
}

impl YahooFundamentalsProvider {
    /// Create a new provider with default rate limiting (1 req/sec).
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(DEFAULT_RATE_LIMIT)
    }

    /// Create a new provider with custom rate limiting.
    pub fn with_rate_limit(min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
        })
    }

    /// Fetch fundamental data for a single symbol.
    pub async fn fetch_fundamentals(&self, symbol: &str) -> Result<FundamentalData> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/{}", QUOTE_SUMMARY_BASE_URL, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("modules", MODULES)])
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        // Yahoo returns a JSON error body alongside 404s
        if !status.is_success() && body.pointer("/quoteSummary/error").is_none() {
            return Err(DataError::YahooApi(format!(
                "Failed to fetch fundamentals for {}: HTTP {}",
                symbol, status
            )));
        }

        let data = parse_quote_summary(symbol, &body)?;
        tracing::debug!(symbol, ?data, "fetched fundamentals");
        Ok(data)
    }
}
