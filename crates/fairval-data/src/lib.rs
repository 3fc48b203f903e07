#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
pub mod source;
pub mod yahoo;

pub use error::{DataError, Result};
pub use memory::InMemorySource;
pub use source::{Lookback, MarketDataSource};
pub use yahoo::{FundamentalData, YahooFundamentalsProvider, YahooQuoteProvider, YahooSource};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
