#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analyzer;
pub mod snapshot;
pub mod watchlist;

// Re-export main types from sub-crates
pub use fairval_data as data;
pub use fairval_output as output;
pub use fairval_valuation as valuation;

pub use analyzer::{Analyzer, DEFAULT_CONCURRENCY, ValuationReport};
pub use fairval_valuation::{ValuationConfig, WeightSet};
pub use watchlist::{CsvWatchlist, Watchlist, WatchlistError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
