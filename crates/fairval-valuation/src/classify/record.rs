//! The valuation record and the classifier that builds it.

use super::band::{Signal, ValuationBand, undervaluation_pct};
use super::market::{MarketRules, MarketSegment};
use super::tier::CapTier;
use crate::inputs::{CompanyProfile, PriceHistoryWindow};
use crate::price_band::estimate_price_band;
use crate::round2;
use serde::{Deserialize, Serialize};

/// Classified valuation of one ticker against its primary (EV/EBITDA) estimate.
///
/// Currency fields and the percentage are rounded to cents. History-derived
/// fields are `None` when no price history was available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
    /// Upper-cased ticker
    pub symbol: String,
    /// Company display name
    pub name: String,
    /// Primary fair value
    pub fair_value: f64,
    /// Current market price
    pub current_price: f64,
    /// Percent the fair value sits above the current price
    pub undervalued_pct: f64,
    /// Valuation band
    pub band: ValuationBand,
    /// Listing market
    pub market: MarketSegment,
    /// Capitalization tier
    pub cap_tier: CapTier,
    /// Industry label
    pub industry: String,
    /// 3-year high
    pub high_3y: Option<f64>,
    /// 3-year low
    pub low_3y: Option<f64>,
    /// Suggested entry price
    pub entry_price: Option<f64>,
    /// Suggested exit price
    pub exit_price: Option<f64>,
    /// Buy or hold/sell
    pub signal: Signal,
}

/// Classify a ticker using the default `.NS`-only market rules.
///
/// Returns `None` when the fair value or current price is missing, or when the
/// current price is zero.
pub fn classify(
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
        &MarketRules::default(),
    )
}

/// Classify a ticker with caller-supplied market rules.
pub fn classify_with_rules(
    ticker: &str,
    fair_value: Option<f64>,
    current_price: Option<f64>,
    history: &PriceHistoryWindow,
    profile: &CompanyProfile,
    rules: &MarketRules,
) -> Option<ValuationRecord> {
    let symbol = ticker.to_uppercase();

    let (Some(fair_value), Some(current_price)) = (fair_value, current_price) else {
        tracing::debug!(%symbol, "fair value or current price unavailable");
        return None;
    };

    let Some(pct) = undervaluation_pct(fair_value, current_price) else {
        tracing::debug!(%symbol, current_price, "differential undefined");
        return None;
    };

    let band = ValuationBand::classify(fair_value, pct);
    let price_band = estimate_price_band(history);

    Some(ValuationRecord {
        market: rules.segment(&symbol),
        symbol,
        name: profile.name.clone(),
        fair_value: round2(fair_value),
        current_price: round2(current_price),
        undervalued_pct: round2(pct),
        band,
        cap_tier: CapTier::from_market_cap(profile.market_cap),
        industry: profile.industry.clone(),
        high_3y: price_band.high,
        low_3y: price_band.low,
        entry_price: price_band.entry,
        exit_price: price_band.exit,
        signal: Signal::from_prices(fair_value, current_price),
    })
}
