//! Fetch-then-value pipeline over a [`MarketDataSource`].

use crate::snapshot::{to_inputs, to_profile};
use fairval_data::{FundamentalData, Lookback, MarketDataSource};
use fairval_valuation::classify::classify_with_rules;
use fairval_valuation::methods::{EvEbitdaConfig, EvEbitdaMethod};
use fairval_valuation::{
    CompanyProfile, FundamentalInputs, MarketRules, PriceHistoryWindow, StyleMethod,
    ValuationConfig, ValuationEstimates, ValuationRecord, WeightSet,
};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

/// Default number of tickers analyzed at once in a batch.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Everything known about one ticker after analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    /// Ticker as requested
    pub symbol: String,
    /// Classified EV/EBITDA valuation, when fair value and price were available
    pub record: Option<ValuationRecord>,
    /// Per-method estimates
    pub estimates: ValuationEstimates,
    /// Weighted blend of the estimates
    pub combined: Option<f64>,
    /// Inputs the estimates were computed from, absent when the snapshot fetch failed
    pub inputs: Option<FundamentalInputs>,
    /// Company metadata
    pub profile: CompanyProfile,
}

impl ValuationReport {
    fn unavailable(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            record: None,
            estimates: ValuationEstimates::default(),
            combined: None,
            inputs: None,
            profile: CompanyProfile::default(),
        }
    }

    /// Whether the snapshot could be fetched at all.
    pub const fn has_data(&self) -> bool {
        self.inputs.is_some()
    }
}

/// Values tickers with data pulled from `S`.
#[derive(Debug)]
pub struct Analyzer<S> {
    source: S,
    config: ValuationConfig,
    rules: MarketRules,
}

impl<S: MarketDataSource> Analyzer<S> {
    /// Analyzer with default rates and `.NS`-only market rules.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: ValuationConfig::default(),
            rules: MarketRules::default(),
        }
    }

    /// Replace the valuation config. Issues are logged, not rejected.
    pub fn with_config(mut self, config: ValuationConfig) -> Self {
        for issue in config.issues() {
            tracing::warn!(%issue, "valuation config issue");
        }
        self.config = config;
        self
    }

    /// Replace the market segmentation rules.
    pub fn with_rules(mut self, rules: MarketRules) -> Self {
        self.rules = rules;
        self
    }

    /// Active valuation config.
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Underlying data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    async fn snapshot(&self, ticker: &str) -> Option<FundamentalData> {
        match self.source.fetch_fundamentals(ticker).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(symbol = %ticker, error = %e, "failed to fetch fundamentals");
                None
            }
        }
    }

    async fn history(&self, ticker: &str, lookback: Lookback) -> PriceHistoryWindow {
        match self.source.fetch_history(ticker, lookback).await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(symbol = %ticker, %lookback, error = %e, "failed to fetch history");
                PriceHistoryWindow::empty()
            }
        }
    }

    /// Unrounded EV/EBITDA fair value and the current price for a ticker.
    ///
    /// Both are `None` when the snapshot cannot be fetched or lacks EV, EBITDA
    /// or share count.
    pub async fn estimate_fair_value(
        &self,
        ticker: &str,
        growth_rate: f64,
    ) -> (Option<f64>, Option<f64>) {
        let Some(data) = self.snapshot(ticker).await else {
            return (None, None);
        };
        let inputs = to_inputs(&data, &self.config);
        ev_method(growth_rate).fair_value(&inputs)
    }

    /// Classify a ticker using this analyzer's market rules.
    pub fn classify(
        &self,
        ticker: &str,
        fair_value: Option<f64>,
        current_price: Option<f64>,
        history: &PriceHistoryWindow,
        profile: &CompanyProfile,
    ) -> Option<ValuationRecord> {
        classify_with_rules(
            ticker,
            fair_value,
            current_price,
            history,
            profile,
            &self.rules,
        )
    }

    /// All four estimates under this analyzer's config.
    pub fn compute_all_estimates(&self, inputs: &FundamentalInputs) -> ValuationEstimates {
        fairval_valuation::compute_all_estimates(inputs, &self.config)
    }

    /// Weighted blend, `None` unless weights total 100 and every estimate exists.
    pub fn combine(&self, estimates: &ValuationEstimates, weights: &WeightSet) -> Option<f64> {
        fairval_valuation::combine(estimates, weights)
    }

    /// Fetch a ticker's snapshot and 3-year history and value it.
    ///
    /// Never fails: a missing snapshot yields a report with no data.
    pub async fn analyze(&self, ticker: &str, weights: &WeightSet) -> ValuationReport {
        let Some(data) = self.snapshot(ticker).await else {
            return ValuationReport::unavailable(ticker);
        };

        let inputs = to_inputs(&data, &self.config);
        let profile = to_profile(&data);

        let (fair_value, current_price) =
            ev_method(self.config.ev_growth_rate).fair_value(&inputs);
        let record = if fair_value.is_some() && current_price.is_some() {
            let history = self.history(ticker, Lookback::BAND).await;
            self.classify(ticker, fair_value, current_price, &history, &profile)
        } else {
            tracing::info!(symbol = %ticker, "no EV/EBITDA fair value");
            None
        };

        let estimates = self.compute_all_estimates(&inputs);
        let combined = self.combine(&estimates, weights);

        ValuationReport {
            symbol: ticker.to_string(),
            record,
            estimates,
            combined,
            inputs: Some(inputs),
            profile,
        }
    }

    /// Analyze many tickers, at most `concurrency` at a time.
    ///
    /// Reports come back in the order the tickers were given.
    pub async fn analyze_batch(
        &self,
        tickers: &[String],
        weights: &WeightSet,
        concurrency: usize,
    ) -> Vec<ValuationReport> {
        self.analyze_batch_with(tickers, weights, concurrency, |_| {})
            .await
    }

    /// Like [`analyze_batch`](Self::analyze_batch), calling `on_done` as each
    /// ticker finishes.
    pub async fn analyze_batch_with<F>(
        &self,
        tickers: &[String],
        weights: &WeightSet,
        concurrency: usize,
        mut on_done: F,
    ) -> Vec<ValuationReport>
    where
        F: FnMut(&ValuationReport),
    {
        let mut indexed: Vec<(usize, ValuationReport)> =
            stream::iter(tickers.iter().enumerate())
                .map(|(i, ticker)| async move { (i, self.analyze(ticker, weights).await) })
                .buffer_unordered(concurrency.max(1))
                .inspect(|(_, report)| on_done(report))
                .collect()
                .await;

        indexed.sort_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, report)| report).collect()
    }

    /// Price history for charting: 5 years, or 3 when the longer window is empty.
    pub async fn overlay_history(&self, ticker: &str) -> PriceHistoryWindow {
        let history = self.history(ticker, Lookback::OVERLAY).await;
        if !history.is_empty() {
            return history;
        }
        tracing::debug!(symbol = %ticker, "no 5y history, falling back to 3y");
        self.history(ticker, Lookback::BAND).await
    }
}

fn ev_method(growth_rate: f64) -> EvEbitdaMethod {
    EvEbitdaMethod::with_config(EvEbitdaConfig { growth_rate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use fairval_data::InMemorySource;
    use fairval_valuation::{CapTier, MarketSegment, PriceBar, Signal, ValuationBand};

    fn infosys() -> FundamentalData {
        FundamentalData {
            short_name: Some("Infosys".to_string()),
            industry: Some("IT Services".to_string()),
            market_cap: Some(75_000_000_000.0),
            enterprise_value: Some(1_200.0),
            ebitda: Some(100.0),
            shares_outstanding: Some(10.0),
            current_price: Some(100.0),
            trailing_eps: Some(5.0),
            book_value: Some(40.0),
            trailing_pe: Some(20.0),
            ..FundamentalData::new("INFY.NS")
        }
    }

    fn bars() -> PriceHistoryWindow {
        PriceHistoryWindow::new(vec![
            PriceBar::new(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), 200.0, 120.0, 150.0),
            PriceBar::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 180.0, 100.0, 110.0),
        ])
    }

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_fundamentals(infosys())
            .with_history("INFY.NS", Lookback::BAND, bars())
    }

    #[tokio::test]
    async fn test_estimate_fair_value() {
        let analyzer = Analyzer::new(source());
        let (fair, price) = analyzer.estimate_fair_value("INFY.NS", 0.10).await;
        assert_relative_eq!(fair.unwrap(), 132.0, epsilon = 1e-9);
        assert_eq!(price, Some(100.0));

        assert_eq!(analyzer.estimate_fair_value("MISSING", 0.10).await, (None, None));
    }

    #[tokio::test]
    async fn test_analyze_full_report() {
        let analyzer = Analyzer::new(source());
        let report = analyzer.analyze("INFY.NS", &WeightSet::default()).await;

        let record = report.record.as_ref().unwrap();
        assert_eq!(record.fair_value, 132.0);
        assert_eq!(record.undervalued_pct, 32.0);
        assert_eq!(record.band, ValuationBand::DeepDiscount);
        assert_eq!(record.market, MarketSegment::India);
        assert_eq!(record.cap_tier, CapTier::Large);
        assert_eq!(record.signal, Signal::Buy);
        assert_eq!(record.entry_price, Some(105.0));
        assert_eq!(record.exit_price, Some(190.0));

        assert_eq!(report.estimates.ev, Some(132.0));
        assert_eq!(report.estimates.dcf, Some(270.0));
        assert_eq!(report.estimates.graham, Some(67.08));
        assert_eq!(report.estimates.pe, Some(100.0));
        // (132*30 + 270*30 + 67.08*20 + 100*20) / 100
        assert_eq!(report.combined, Some(154.02));
        assert!(report.has_data());
    }

    #[tokio::test]
    async fn test_analyze_missing_snapshot() {
        let analyzer = Analyzer::new(InMemorySource::new());
        let report = analyzer.analyze("NOPE", &WeightSet::default()).await;

        assert!(!report.has_data());
        assert_eq!(report.record, None);
        assert_eq!(report.combined, None);
        assert_eq!(report.profile.name, "N/A");
    }

    #[tokio::test]
    async fn test_analyze_without_history() {
        let source = InMemorySource::new().with_fundamentals(infosys());
        let report = Analyzer::new(source)
            .analyze("INFY.NS", &WeightSet::default())
            .await;

        let record = report.record.unwrap();
        assert_eq!(record.high_3y, None);
        assert_eq!(record.entry_price, None);
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let source = ["C", "A", "B"].into_iter().fold(source(), |s, sym| {
            s.with_fundamentals(FundamentalData {
                current_price: Some(10.0),
                ..FundamentalData::new(sym)
            })
        });
        let analyzer = Analyzer::new(source);
        let tickers: Vec<String> = ["B", "INFY.NS", "MISSING", "C", "A"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut seen = 0;
        let reports = analyzer
            .analyze_batch_with(&tickers, &WeightSet::default(), 2, |_| seen += 1)
            .await;

        let symbols: Vec<&str> = reports.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "INFY.NS", "MISSING", "C", "A"]);
        assert_eq!(seen, 5);
        assert!(reports[1].record.is_some());
        assert!(!reports[2].has_data());
    }

    #[tokio::test]
    async fn test_overlay_falls_back_to_band_window() {
        let analyzer = Analyzer::new(source());
        assert_eq!(analyzer.overlay_history("INFY.NS").await.len(), 2);

        let longer = PriceHistoryWindow::new(vec![PriceBar::new(
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            90.0,
            80.0,
            85.0,
        )]);
        let analyzer =
            Analyzer::new(source().with_history("INFY.NS", Lookback::OVERLAY, longer));
        assert_eq!(analyzer.overlay_history("INFY.NS").await.len(), 1);
    }

    #[tokio::test]
    async fn test_config_growth_drives_primary_estimate() {
        let config = ValuationConfig {
            ev_growth_rate: 0.0,
            ..Default::default()
        };
        let analyzer = Analyzer::new(source()).with_config(config);
        let report = analyzer.analyze("INFY.NS", &WeightSet::default()).await;

        assert_eq!(report.estimates.ev, Some(120.0));
        // 20% exactly is not above the High Value threshold
        assert_eq!(report.record.unwrap().band, ValuationBand::Undervalued);
    }
}
