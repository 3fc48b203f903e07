//! Traits shared by the fair-value methods.

use crate::inputs::FundamentalInputs;

/// Broad family a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Derived from earnings alone (DCF, P/E)
    Earnings,
    /// Blends earnings with balance-sheet value (Graham)
    Asset,
    /// Derived from enterprise value and EBITDA
    Enterprise,
}

/// A fair-value estimator.
///
/// Implementations are total: invalid or missing inputs produce `None`, never a
/// panic and never a zero standing in for "unknown".
pub trait FairValueMethod {
    /// Unique method name.
    fn name(&self) -> &str;

    /// Method family.
    fn kind(&self) -> MethodKind;

    /// Estimate a fair price per share.
    fn estimate(&self, inputs: &FundamentalInputs) -> Option<f64>;

    /// Names of the [`FundamentalInputs`] fields the method reads.
    fn required_inputs(&self) -> &[&str];
}

/// A method parameterised by a configuration struct.
pub trait StyleMethod: FairValueMethod + Sized {
    /// Configuration type
    type Config: Default;

    /// Build the method from a config.
    fn with_config(config: Self::Config) -> Self;

    /// Active configuration.
    fn config(&self) -> &Self::Config;
}
