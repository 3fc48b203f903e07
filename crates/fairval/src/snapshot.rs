//! Conversion from provider snapshots to engine inputs.
//!
//! Absent provider fields take these defaults: EPS 0, book value 0, trailing
//! P/E from the config (15), name "N/A", market cap 0, industry "N/A". The EV,
//! EBITDA, share count and price stay optional.

use fairval_data::FundamentalData;
use fairval_valuation::{CompanyProfile, FundamentalInputs, ValuationConfig};

/// Engine inputs for a snapshot.
pub fn to_inputs(data: &FundamentalData, config: &ValuationConfig) -> FundamentalInputs {
    FundamentalInputs {
        eps: data.trailing_eps.unwrap_or(0.0),
        book_value_per_share: data.book_value.unwrap_or(0.0),
        pe_ratio_hint: data.trailing_pe.unwrap_or(config.default_pe_ratio),
        enterprise_value: data.enterprise_value,
        ebitda: data.ebitda,
        shares_outstanding: data.shares_outstanding,
        current_price: data.current_price,
    }
}

/// Company metadata for a snapshot.
pub fn to_profile(data: &FundamentalData) -> CompanyProfile {
    let defaults = CompanyProfile::default();
    CompanyProfile {
        name: data.short_name.clone().unwrap_or(defaults.name),
        market_cap: data.market_cap.unwrap_or(defaults.market_cap),
        industry: data.industry.clone().unwrap_or(defaults.industry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_defaults() {
        let data = FundamentalData::new("XYZ");
        let config = ValuationConfig::default();

        let inputs = to_inputs(&data, &config);
        assert_eq!(inputs.eps, 0.0);
        assert_eq!(inputs.book_value_per_share, 0.0);
        assert_eq!(inputs.pe_ratio_hint, 15.0);
        assert_eq!(inputs.enterprise_value, None);
        assert_eq!(inputs.current_price, None);

        let profile = to_profile(&data);
        assert_eq!(profile, CompanyProfile::default());
    }

    #[test]
    fn test_reported_values_pass_through() {
        let data = FundamentalData {
            short_name: Some("Apple Inc.".to_string()),
            industry: Some("Consumer Electronics".to_string()),
            market_cap: Some(2.9e12),
            trailing_eps: Some(6.43),
            book_value: Some(4.38),
            trailing_pe: Some(29.87),
            ebitda: Some(1.31e11),
            ..FundamentalData::new("AAPL")
        };

        let inputs = to_inputs(&data, &ValuationConfig::default());
        assert_eq!(inputs.eps, 6.43);
        assert_eq!(inputs.pe_ratio_hint, 29.87);
        assert_eq!(inputs.ebitda, Some(1.31e11));

        let profile = to_profile(&data);
        assert_eq!(profile.name, "Apple Inc.");
        assert_eq!(profile.market_cap, 2.9e12);
    }

    #[test]
    fn test_configured_pe_default() {
        let config = ValuationConfig {
            default_pe_ratio: 12.0,
            ..Default::default()
        };
        let inputs = to_inputs(&FundamentalData::new("X"), &config);
        assert_eq!(inputs.pe_ratio_hint, 12.0);
    }
}
