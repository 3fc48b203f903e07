//! CSV and JSON export of valuation results.

use fairval_valuation::{
    CapTier, MarketSegment, Signal, ValuationBand, ValuationEstimates, ValuationRecord,
};
use crate::report::NOT_AVAILABLE;
use serde::{Deserialize, Serialize, Serializer};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer produced non-UTF-8 output.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Infer the format from a file extension. JSON files are pretty-printed.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::PrettyJson),
            _ => Err(ExportError::InvalidFormat(path.display().to_string())),
        }
    }
}

/// One exported row: the classified record plus the alternative estimates and
/// the blend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuationExport {
    /// Upper-cased ticker
    pub symbol: String,
    /// Company display name
    pub name: String,
    /// EV/EBITDA fair value
    pub fair_value_ev: f64,
    /// Current market price
    pub current_price: f64,
    /// Percent the fair value sits above the price
    pub undervalued_pct: f64,
    /// Valuation band
    pub valuation_band: ValuationBand,
    /// Listing market
    pub market: MarketSegment,
    /// Capitalization tier
    pub cap_size: CapTier,
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
    /// DCF fair value
    pub fair_value_dcf: Option<f64>,
    /// Graham number
    pub fair_value_graham: Option<f64>,
    /// P/E fair value
    pub fair_value_pe: Option<f64>,
    /// Weighted blend
    pub combined: Option<f64>,
}

impl ValuationExport {
    /// Flatten a record and its estimates into one row.
    pub fn new(
        record: &ValuationRecord,
        estimates: &ValuationEstimates,
        combined: Option<f64>,
    ) -> Self {
        Self {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            fair_value_ev: record.fair_value,
            current_price: record.current_price,
            undervalued_pct: record.undervalued_pct,
            valuation_band: record.band,
            market: record.market,
            cap_size: record.cap_tier,
            industry: record.industry.clone(),
            high_3y: record.high_3y,
            low_3y: record.low_3y,
            entry_price: record.entry_price,
            exit_price: record.exit_price,
            signal: record.signal,
            fair_value_dcf: estimates.dcf,
            fair_value_graham: estimates.graham,
            fair_value_pe: estimates.pe,
            combined,
        }
    }
}

/// CSV view of a [`ValuationExport`]. Absent figures are written as `N/A`
/// rather than empty cells; JSON keeps them as `null`.
#[derive(Serialize)]
struct CsvRow<'a> {
    symbol: &'a str,
    name: &'a str,
    fair_value_ev: f64,
    current_price: f64,
    undervalued_pct: f64,
    valuation_band: ValuationBand,
    market: MarketSegment,
    cap_size: CapTier,
    industry: &'a str,
    #[serde(serialize_with = "or_not_available")]
    high_3y: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    low_3y: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    entry_price: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    exit_price: Option<f64>,
    signal: Signal,
    #[serde(serialize_with = "or_not_available")]
    fair_value_dcf: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    fair_value_graham: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    fair_value_pe: Option<f64>,
    #[serde(serialize_with = "or_not_available")]
    combined: Option<f64>,
}

fn or_not_available<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

impl<'a> From<&'a ValuationExport> for CsvRow<'a> {
    fn from(row: &'a ValuationExport) -> Self {
        Self {
            symbol: &row.symbol,
            name: &row.name,
            fair_value_ev: row.fair_value_ev,
            current_price: row.current_price,
            undervalued_pct: row.undervalued_pct,
            valuation_band: row.valuation_band,
            market: row.market,
            cap_size: row.cap_size,
            industry: &row.industry,
            high_3y: row.high_3y,
            low_3y: row.low_3y,
            entry_price: row.entry_price,
            exit_price: row.exit_price,
            signal: row.signal,
            fair_value_dcf: row.fair_value_dcf,
            fair_value_graham: row.fair_value_graham,
            fair_value_pe: row.fair_value_pe,
            combined: row.combined,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Write the data to `writer` in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn export_to_writer<W: Write>(
        &self,
        writer: W,
        format: ExportFormat,
    ) -> Result<(), ExportError>;

    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.export_to_writer(&mut buf, format)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.export_to_writer(file, format)
    }
}

fn write_rows<'a, W, I>(writer: W, rows: I, format: ExportFormat) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ValuationExport> + Serialize,
{
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(writer);
            for row in rows {
                wtr.serialize(CsvRow::from(row))?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => serde_json::to_writer(writer, &rows)?,
        ExportFormat::PrettyJson => serde_json::to_writer_pretty(writer, &rows)?,
    }
    Ok(())
}

impl Exporter for ValuationExport {
    fn export_to_writer<W: Write>(
        &self,
        writer: W,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        match format {
            ExportFormat::Csv => write_rows(writer, std::slice::from_ref(self), format),
            ExportFormat::Json => Ok(serde_json::to_writer(writer, self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_writer_pretty(writer, self)?),
        }
    }
}

impl Exporter for Vec<ValuationExport> {
    fn export_to_writer<W: Write>(
        &self,
        writer: W,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        write_rows(writer, self, format)
    }
}
