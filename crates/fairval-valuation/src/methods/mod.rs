//! Fair-value methods - independent per-share price estimates
//!
//! Each method is available both as a free function taking the raw numbers and
//! as a configurable [`FairValueMethod`](crate::traits::FairValueMethod)
//! implementation reading a [`FundamentalInputs`](crate::inputs::FundamentalInputs).

pub mod dcf;
pub mod ev_ebitda;
pub mod graham;
pub mod pe;

pub use dcf::{DcfConfig, DcfMethod, dcf_valuation};
pub use ev_ebitda::{EvEbitdaConfig, EvEbitdaMethod, estimate_fair_value};
pub use graham::{GrahamConfig, GrahamMethod, graham_valuation};
pub use pe::{PeConfig, PeMethod, pe_valuation};
