//! Watchlists read from CSV files with a `Symbol` column.

use super::Watchlist;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Header of the ticker column, matched case-insensitively.
pub const SYMBOL_COLUMN: &str = "symbol";

/// Errors loading a watchlist
#[derive(Debug, Error)]
pub enum WatchlistError {
    /// File could not be opened
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// No column named `Symbol`
    #[error("no Symbol column in header: {0:?}")]
    MissingSymbolColumn(Vec<String>),
}

/// Tickers from a CSV file, upper-cased and de-duplicated in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvWatchlist {
    symbols: Vec<String>,
}

impl CsvWatchlist {
    /// Load from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WatchlistError> {
        let file = File::open(path.as_ref())?;
        let watchlist = Self::from_reader(file)?;
        tracing::info!(
            path = %path.as_ref().display(),
            symbols = watchlist.symbols.len(),
            "loaded watchlist"
        );
        Ok(watchlist)
    }

    /// Load from any reader. Blank cells are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WatchlistError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(SYMBOL_COLUMN))
            .ok_or_else(|| {
                WatchlistError::MissingSymbolColumn(headers.iter().map(str::to_string).collect())
            })?;

        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        for record in reader.records() {
            let record = record?;
            let Some(cell) = record.get(column).filter(|c| !c.is_empty()) else {
                continue;
            };
            let symbol = cell.to_uppercase();
            if seen.insert(symbol.clone()) {
                symbols.push(symbol);
            }
        }

        Ok(Self { symbols })
    }

    /// Tickers in file order.
    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }
}

impl Watchlist for CsvWatchlist {
    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_dedup_uppercase_order() {
        let data = "Company,Symbol,Sector\n\
                    Infosys,infy.ns,IT\n\
                    Apple,AAPL,Tech\n\
                    Infosys again,INFY.NS,IT\n\
                    Blank,,\n\
                    TCS, tcs.ns ,IT\n";
        let list = CsvWatchlist::from_reader(data.as_bytes()).unwrap();

        assert_eq!(list.as_slice(), ["INFY.NS", "AAPL", "TCS.NS"]);
        assert_eq!(list.size(), 3);
        assert!(list.contains("aapl"));
    }

    #[rstest]
    #[case("Symbol\nAAPL\n")]
    #[case("SYMBOL\nAAPL\n")]
    #[case("symbol,Name\nAAPL,Apple\n")]
    fn test_header_case_insensitive(#[case] data: &str) {
        let list = CsvWatchlist::from_reader(data.as_bytes()).unwrap();
        assert_eq!(list.symbols(), vec!["AAPL".to_string()]);
    }

    #[test]
    fn test_missing_symbol_column() {
        let result = CsvWatchlist::from_reader("Ticker,Name\nAAPL,Apple\n".as_bytes());
        assert!(matches!(
            result,
            Err(WatchlistError::MissingSymbolColumn(cols)) if cols == ["Ticker", "Name"]
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvWatchlist::from_path("/nonexistent/watchlist.csv"),
            Err(WatchlistError::Io(_))
        ));
    }
}
