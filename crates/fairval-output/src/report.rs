//! Plain-text and Markdown reports for a valued ticker.
//!
//! A report is a list of [`Table`]s: the classified record with the
//! alternative estimates appended, the raw inputs, and the method comparison
//! (only when a combined value exists). Missing numbers render as `N/A`.

use chrono::{DateTime, Utc};
use fairval_valuation::{FundamentalInputs, Method, ValuationEstimates, ValuationRecord};
use serde::{Deserialize, Serialize};

/// Placeholder for a value that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an optional currency figure to two decimals.
pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}", v))
}

/// A titled grid of preformatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Section title
    pub title: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Rows, each as long as `headers`
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table.
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render as a fixed-width text table. The first column is left-aligned,
    /// the rest right-aligned.
    pub fn to_ascii_table(&self) -> String {
        let widths = self.column_widths();
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    if i == 0 {
                        format!("{:<w$}", cell, w = *w)
                    } else {
                        format!("{:>w$}", cell, w = *w)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut output = String::new();
        output.push_str(&format!("\n{}\n", self.title));
        output.push_str(&"=".repeat(total));
        output.push('\n');
        output.push_str(line(&self.headers).trim_end());
        output.push('\n');
        output.push_str(&"-".repeat(total));
        output.push('\n');
        for row in &self.rows {
            output.push_str(line(row).trim_end());
            output.push('\n');
        }
        output
    }

    /// Render as a GitHub-flavored Markdown table under a level-3 heading.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("### {}\n\n", self.title));
        output.push_str(&format!("| {} |\n", self.headers.join(" | ")));
        output.push_str(&format!(
            "|{}|\n",
            vec!["---"; self.headers.len()].join("|")
        ));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output
    }
}

/// One record per row, with the DCF, Graham and P/E estimates appended.
pub fn record_table(rows: &[(ValuationRecord, ValuationEstimates)]) -> Table {
    let mut table = Table::new(
        "Filtered View",
        &[
            "Symbol",
            "Name",
            "Fair Value (EV)",
            "Current Price",
            "Undervalued (%)",
            "Valuation Band",
            "Market",
            "Cap Size",
            "Industry",
            "3Y High",
            "3Y Low",
            "Entry Price",
            "Exit Price",
            "Signal",
            "Fair Value (DCF)",
            "Fair Value (Graham)",
            "Fair Value (PE)",
        ],
    );

    for (record, estimates) in rows {
        table.push_row(vec![
            record.symbol.clone(),
            record.name.clone(),
            format_value(Some(record.fair_value)),
            format_value(Some(record.current_price)),
            format_value(Some(record.undervalued_pct)),
            record.band.to_string(),
            record.market.to_string(),
            record.cap_tier.to_string(),
            record.industry.clone(),
            format_value(record.high_3y),
            format_value(record.low_3y),
            format_value(record.entry_price),
            format_value(record.exit_price),
            record.signal.to_string(),
            format_value(estimates.dcf),
            format_value(estimates.graham),
            format_value(estimates.pe),
        ]);
    }

    table
}

/// A single record laid out as field/value pairs, for narrow terminals.
pub fn record_detail_table(record: &ValuationRecord, estimates: &ValuationEstimates) -> Table {
    let wide = record_table(&[(record.clone(), *estimates)]);
    let mut table = Table::new(format!("{} ({})", record.symbol, record.name), &["Field", "Value"]);
    if let Some(values) = wide.rows.into_iter().next() {
        for (field, value) in wide.headers.into_iter().zip(values) {
            table.push_row(vec![field, value]);
        }
    }
    table
}

/// Provider inputs next to every method's estimate.
pub fn raw_data_table(
    symbol: &str,
    inputs: &FundamentalInputs,
    estimates: &ValuationEstimates,
) -> Table {
    let mut table = Table::new(
        "Full Raw Data",
        &[
            "Ticker",
            "EPS",
            "Book Value",
            "PE Ratio",
            "Fair Value (EV)",
            "Fair Value (DCF)",
            "Fair Value (Graham)",
            "Fair Value (PE)",
        ],
    );

    let mut row = vec![
        symbol.to_string(),
        inputs.eps.to_string(),
        inputs.book_value_per_share.to_string(),
        inputs.pe_ratio_hint.to_string(),
    ];
    row.extend(estimates.iter().map(|e| format_value(e.value)));
    table.push_row(row);

    table
}

/// Method-by-method comparison ending with the blend. `None` without a blend.
pub fn comparison_table(estimates: &ValuationEstimates, combined: Option<f64>) -> Option<Table> {
    let combined = combined?;
    let mut table = Table::new("Valuation Comparison", &["Method", "Fair Value"]);
    for method in Method::ALL {
        table.push_row(vec![
            method.label().to_string(),
            format_value(estimates.get(method)),
        ]);
    }
    table.push_row(vec!["Combined".to_string(), format_value(Some(combined))]);
    Some(table)
}

/// A rendered analysis of one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Ticker being analyzed
    pub symbol: String,

    /// Generation timestamp
    pub timestamp: DateTime<Utc>,

    /// Sections in display order
    pub sections: Vec<Table>,
}

impl Report {
    /// Create a report from prepared sections.
    pub fn new(symbol: String, sections: Vec<Table>) -> Self {
        Self {
            symbol,
            timestamp: Utc::now(),
            sections,
        }
    }

    /// Plain-text rendering.
    pub fn to_ascii(&self) -> String {
        let mut output = format!("Fair Value Report: {}\n", self.symbol);
        if self.sections.is_empty() {
            output.push_str("\nNo valuation data available.\n");
        }
        for section in &self.sections {
            output.push_str(&section.to_ascii_table());
        }
        output
    }

    /// Markdown rendering.
    pub fn to_markdown(&self) -> String {
        let mut output = format!("# Fair Value Report: {}\n\n", self.symbol);
        output.push_str(&format!(
            "*Generated {}*\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M UTC")
        ));
        if self.sections.is_empty() {
            output.push_str("No valuation data available.\n");
        }
        for section in &self.sections {
            output.push_str(&section.to_markdown());
            output.push('\n');
        }
        output
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    symbol: String,
    record: Option<ValuationRecord>,
    estimates: ValuationEstimates,
    combined: Option<f64>,
    inputs: Option<FundamentalInputs>,
}

impl ReportBuilder {
    /// Start a report for a ticker.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    /// Set the classified record.
    pub fn record(mut self, record: Option<ValuationRecord>) -> Self {
        self.record = record;
        self
    }

    /// Set the per-method estimates.
    pub const fn estimates(mut self, estimates: ValuationEstimates) -> Self {
        self.estimates = estimates;
        self
    }

    /// Set the blended value.
    pub const fn combined(mut self, combined: Option<f64>) -> Self {
        self.combined = combined;
        self
    }

    /// Set the inputs the estimates came from.
    pub const fn inputs(mut self, inputs: Option<FundamentalInputs>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Build the report. Sections without data are left out.
    pub fn build(self) -> Report {
        let mut sections = Vec::new();
        if let Some(record) = &self.record {
            sections.push(record_detail_table(record, &self.estimates));
        }
        if let Some(inputs) = &self.inputs {
            sections.push(raw_data_table(&self.symbol, inputs, &self.estimates));
        }
        if let Some(table) = comparison_table(&self.estimates, self.combined) {
            sections.push(table);
        }
        Report::new(self.symbol, sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairval_valuation::{CapTier, MarketSegment, Signal, ValuationBand};

    fn record() -> ValuationRecord {
        ValuationRecord {
            symbol: "INFY.NS".to_string(),
            name: "Infosys".to_string(),
            fair_value: 132.0,
            current_price: 100.0,
            undervalued_pct: 32.0,
            band: ValuationBand::DeepDiscount,
            market: MarketSegment::India,
            cap_tier: CapTier::Large,
            industry: "IT Services".to_string(),
            high_3y: Some(200.0),
            low_3y: Some(100.0),
            entry_price: Some(105.0),
            exit_price: Some(190.0),
            signal: Signal::Buy,
        }
    }

    fn estimates() -> ValuationEstimates {
        ValuationEstimates {
            ev: Some(132.0),
            dcf: Some(270.0),
            graham: None,
            pe: Some(100.0),
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(67.08)), "67.08");
        assert_eq!(format_value(Some(120.0)), "120.00");
        assert_eq!(format_value(None), "N/A");
    }

    #[test]
    fn test_record_table_columns() {
        let table = record_table(&[(record(), estimates())]);
        assert_eq!(table.headers.len(), 17);
        let row = &table.rows[0];
        assert_eq!(row[5], "Deep Discount");
        assert_eq!(row[12], "190.00");
        assert_eq!(row[13], "Buy");
        assert_eq!(row[15], "N/A");
    }

    #[test]
    fn test_comparison_requires_combined() {
        assert!(comparison_table(&estimates(), None).is_none());

        let table = comparison_table(&estimates(), Some(154.02)).unwrap();
        let methods: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(methods, ["EV", "DCF", "Graham", "PE", "Combined"]);
        assert_eq!(table.rows[4][1], "154.02");
    }

    #[test]
    fn test_raw_data_row() {
        let inputs = FundamentalInputs {
            eps: 5.0,
            book_value_per_share: 40.0,
            pe_ratio_hint: 15.0,
            ..Default::default()
        };
        let table = raw_data_table("AAPL", &inputs, &estimates());
        assert_eq!(
            table.rows[0],
            ["AAPL", "5", "40", "15", "132.00", "270.00", "N/A", "100.00"]
        );
    }

    #[test]
    fn test_ascii_alignment() {
        let mut table = Table::new("T", &["Method", "Fair Value"]);
        table.push_row(vec!["EV".to_string(), "132.00".to_string()]);
        let text = table.to_ascii_table();

        assert!(text.contains("Method  Fair Value"));
        assert!(text.contains("EV          132.00"));
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let mut table = Table::new("Bands", &["Band"]);
        table.push_row(vec!["a|b".to_string()]);
        let md = table.to_markdown();

        assert!(md.starts_with("### Bands"));
        assert!(md.contains("|---|"));
        assert!(md.contains("| a\\|b |"));
    }

    #[test]
    fn test_builder_skips_empty_sections() {
        let report = ReportBuilder::new("NOPE").build();
        assert!(report.sections.is_empty());
        assert!(report.to_ascii().contains("No valuation data available."));

        let report = ReportBuilder::new("INFY.NS")
            .record(Some(record()))
            .estimates(estimates())
            .inputs(Some(FundamentalInputs::default()))
            .combined(None)
            .build();
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["INFY.NS (Infosys)", "Full Raw Data"]);
        assert!(report.to_markdown().contains("| Signal | Buy |"));
    }
}
