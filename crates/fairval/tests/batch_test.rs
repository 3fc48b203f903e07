//! Watchlist-driven batch analysis over an in-memory source.

use fairval::data::{FundamentalData, InMemorySource};
use fairval::valuation::ValuationBand;
use fairval::{Analyzer, CsvWatchlist, Watchlist, WeightSet};

fn snapshot(symbol: &str, enterprise_value: f64, price: f64) -> FundamentalData {
    FundamentalData {
        enterprise_value: Some(enterprise_value),
        ebitda: Some(100.0),
        shares_outstanding: Some(10.0),
        current_price: Some(price),
        trailing_eps: Some(4.0),
        book_value: Some(25.0),
        ..FundamentalData::new(symbol)
    }
}

#[tokio::test]
async fn test_watchlist_batch() {
    let csv = "Symbol,Note\nmsft,\nINFY.NS,\nNOPE,\nmsft,dup\n";
    let watchlist = CsvWatchlist::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(watchlist.size(), 3);

    let source = InMemorySource::new()
        .with_fundamentals(snapshot("MSFT", 1_000.0, 100.0))
        .with_fundamentals(snapshot("INFY.NS", 2_000.0, 100.0));
    let analyzer = Analyzer::new(source);

    let reports = analyzer
        .analyze_batch(&watchlist.symbols(), &WeightSet::default(), 3)
        .await;

    let symbols: Vec<&str> = reports.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["MSFT", "INFY.NS", "NOPE"]);

    // 1000 * 1.1 / 10 = 110, 10% above price
    let msft = reports[0].record.as_ref().unwrap();
    assert_eq!(msft.fair_value, 110.0);
    assert_eq!(msft.band, ValuationBand::FairPremium);

    // 2000 * 1.1 / 10 = 220
    let infy = reports[1].record.as_ref().unwrap();
    assert_eq!(infy.band, ValuationBand::DeepDiscount);

    assert!(!reports[2].has_data());

    // PE falls back to 15 when no trailing P/E is reported
    assert_eq!(reports[0].estimates.pe, Some(60.0));
    assert!(reports[0].combined.is_some());
}
