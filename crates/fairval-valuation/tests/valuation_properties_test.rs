//! End-to-end properties of the valuation engine

use chrono::NaiveDate;
use fairval_valuation::classify::{classify, undervaluation_pct};
use fairval_valuation::methods::{dcf_valuation, estimate_fair_value, graham_valuation, pe_valuation};
use fairval_valuation::{
    CapTier, CompanyProfile, FundamentalInputs, PriceBar, PriceHistoryWindow, Signal,
    ValuationBand, ValuationConfig, ValuationEstimates, WeightSet, combine, compute_all_estimates,
};

#[test]
fn test_non_positive_eps_leaves_earnings_methods_undefined() {
    for eps in [0.0, -0.5, -100.0] {
        assert_eq!(dcf_valuation(eps, 0.08, 0.10), None);
        assert_eq!(graham_valuation(eps, 40.0), None);
        assert_eq!(pe_valuation(eps, 15.0), None);
    }
}

#[test]
fn test_reference_values() {
    assert_eq!(graham_valuation(5.0, 40.0), Some(67.08));
    assert_eq!(dcf_valuation(10.0, 0.08, 0.10), Some(540.0));
    assert_eq!(pe_valuation(8.0, 15.0), Some(120.0));
    assert_eq!(pe_valuation(8.0, 20.0), Some(160.0));
}

#[test]
fn test_ev_requires_every_component() {
    let full = (Some(5e9), Some(5e8), Some(1e8));
    assert!(estimate_fair_value(full.0, full.1, full.2, Some(50.0), 0.10).0.is_some());

    assert_eq!(estimate_fair_value(Some(0.0), full.1, full.2, Some(50.0), 0.10), (None, None));
    assert_eq!(estimate_fair_value(full.0, None, full.2, Some(50.0), 0.10), (None, None));
    assert_eq!(estimate_fair_value(full.0, full.1, Some(0.0), Some(50.0), 0.10), (None, None));
}

#[test]
fn test_band_boundaries_through_classifier() {
    let history = PriceHistoryWindow::empty();
    let profile = CompanyProfile::default();

    let band_for = |fair: f64| {
        classify("T", Some(fair), Some(100.0), &history, &profile)
            .unwrap()
            .band
    };

    assert_eq!(band_for(104.0), ValuationBand::OverValued);
    assert_eq!(band_for(110.0), ValuationBand::FairPremium);
    assert_eq!(band_for(118.5), ValuationBand::Undervalued);
    assert_eq!(band_for(120.5), ValuationBand::HighValue);
    assert_eq!(band_for(130.5), ValuationBand::DeepDiscount);
    assert_eq!(band_for(-10.0), ValuationBand::OverValued);
}

#[test]
fn test_differential_is_relative_to_price() {
    let pct = undervaluation_pct(150.0, 100.0).unwrap();
    assert!((pct - 50.0).abs() < 1e-9);
}

#[test]
fn test_combiner_reference_and_invalid_sums() {
    let estimates = ValuationEstimates {
        ev: Some(100.0),
        dcf: Some(90.0),
        graham: Some(80.0),
        pe: Some(70.0),
    };

    assert_eq!(combine(&estimates, &WeightSet::new(30, 30, 20, 20)), Some(86.0));
    assert_eq!(combine(&estimates, &WeightSet::new(30, 30, 20, 19)), None);
    assert_eq!(combine(&estimates, &WeightSet::new(30, 30, 20, 21)), None);
}

#[test]
fn test_cap_tier_boundary() {
    assert_eq!(CapTier::from_market_cap(2_000_000_000.0), CapTier::Mid);
    assert_eq!(CapTier::from_market_cap(1_999_999_999.0), CapTier::Small);
}

#[test]
fn test_full_pipeline() {
    let inputs = FundamentalInputs {
        eps: 5.0,
        book_value_per_share: 40.0,
        pe_ratio_hint: 20.0,
        enterprise_value: Some(1_200_000_000.0),
        ebitda: Some(100_000_000.0),
        shares_outstanding: Some(10_000_000.0),
        current_price: Some(100.0),
    };
    let config = ValuationConfig::default();

    let estimates = compute_all_estimates(&inputs, &config);
    let (fair, price) = estimate_fair_value(
        inputs.enterprise_value,
        inputs.ebitda,
        inputs.shares_outstanding,
        inputs.current_price,
        config.ev_growth_rate,
    );

    let history = PriceHistoryWindow::new(vec![
        PriceBar::new(NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(), 140.0, 100.0, 120.0),
        PriceBar::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 200.0, 150.0, 180.0),
    ]);
    let profile = CompanyProfile {
        name: "Example Corp".to_string(),
        market_cap: 1_000_000_000.0,
        industry: "Widgets".to_string(),
    };

    let record = classify("exmp", fair, price, &history, &profile).unwrap();
    assert_eq!(record.symbol, "EXMP");
    assert_eq!(record.fair_value, 132.0);
    assert_eq!(record.undervalued_pct, 32.0);
    assert_eq!(record.band, ValuationBand::DeepDiscount);
    assert_eq!(record.signal, Signal::Buy);
    assert_eq!(record.cap_tier, CapTier::Small);
    assert_eq!(record.entry_price, Some(105.0));
    assert_eq!(record.exit_price, Some(190.0));

    let combined = combine(&estimates, &WeightSet::default()).unwrap();
    // 132*30 + 270*30 + 67.08*20 + 100*20
    assert_eq!(combined, 154.02);
}
