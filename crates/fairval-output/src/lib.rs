#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairval/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;

pub use export::{ExportError, ExportFormat, Exporter, ValuationExport};
pub use report::{
    NOT_AVAILABLE, Report, ReportBuilder, Table, comparison_table, format_value, raw_data_table,
    record_detail_table, record_table,
};
