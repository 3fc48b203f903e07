//! Demonstration of report rendering and export in fairval-output.

use fairval_output::{ExportFormat, Exporter, ReportBuilder, ValuationExport};
use fairval_valuation::{
    CompanyProfile, FundamentalInputs, PriceHistoryWindow, ValuationConfig, WeightSet,
    classify::classify, combine, compute_all_estimates,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fairval Export Demo ===\n");

    let inputs = FundamentalInputs {
        eps: 6.43,
        book_value_per_share: 4.38,
        pe_ratio_hint: 29.87,
        enterprise_value: Some(2.95e12),
        ebitda: Some(1.31e11),
        shares_outstanding: Some(1.53e10),
        current_price: Some(189.84),
    };
    let profile = CompanyProfile {
        name: "Apple Inc.".to_string(),
        market_cap: 2.9e12,
        industry: "Consumer Electronics".to_string(),
    };

    let estimates = compute_all_estimates(&inputs, &ValuationConfig::default());
    let combined = combine(&estimates, &WeightSet::default());
    let record = classify(
        "AAPL",
        estimates.ev,
        inputs.current_price,
        &PriceHistoryWindow::empty(),
        &profile,
    );

    let report = ReportBuilder::new("AAPL")
        .record(record.clone())
        .estimates(estimates)
        .combined(combined)
        .inputs(Some(inputs))
        .build();

    println!("{}", report.to_ascii());
    println!("{}", report.to_markdown());

    if let Some(record) = record {
        let rows = vec![ValuationExport::new(&record, &estimates, combined)];
        println!("CSV:\n{}", rows.export_to_string(ExportFormat::Csv)?);
        println!("JSON:\n{}", rows.export_to_string(ExportFormat::PrettyJson)?);
    }

    Ok(())
}
