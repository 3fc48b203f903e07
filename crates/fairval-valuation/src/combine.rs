//! Weighted combination of the four estimates.

use crate::estimates::{Method, ValuationEstimates};
use crate::round2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Total a weight set must reach to be usable.
pub const WEIGHT_TOTAL: u32 = 100;

/// Per-method weights, as integer percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightSet {
    /// EV/EBITDA weight
    pub ev: u32,
    /// DCF weight
    pub dcf: u32,
    /// Graham weight
    pub graham: u32,
    /// P/E weight
    pub pe: u32,
}

impl Default for WeightSet {
    /// 30 / 30 / 20 / 20.
    fn default() -> Self {
        Self::new(30, 30, 20, 20)
    }
}

impl WeightSet {
    /// Create a weight set in EV, DCF, Graham, PE order.
    pub const fn new(ev: u32, dcf: u32, graham: u32, pe: u32) -> Self {
        Self {
            ev,
            dcf,
            graham,
            pe,
        }
    }

    /// Sum of all four weights, widened so no combination of `u32` weights
    /// can overflow.
    pub const fn total(&self) -> u64 {
        self.ev as u64 + self.dcf as u64 + self.graham as u64 + self.pe as u64
    }

    /// A set is valid only when it sums to exactly 100.
    pub const fn is_valid(&self) -> bool {
        self.total() == WEIGHT_TOTAL as u64
    }

    /// Weight for one method.
    pub const fn get(&self, method: Method) -> u32 {
        match method {
            Method::Ev => self.ev,
            Method::Dcf => self.dcf,
            Method::Graham => self.graham,
            Method::Pe => self.pe,
        }
    }
}

impl fmt::Display for WeightSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.ev, self.dcf, self.graham, self.pe)
    }
}

/// Errors parsing a weight set string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeightSetParseError {
    /// Not exactly four comma-separated values
    #[error("expected 4 comma-separated weights (EV,DCF,Graham,PE), got {0}")]
    WrongCount(usize),

    /// A component is not a non-negative integer
    #[error("invalid weight '{0}'")]
    InvalidWeight(String),
}

impl FromStr for WeightSet {
    type Err = WeightSetParseError;

    /// Parses `"30,30,20,20"`. The sum is not checked here; an off-total set
    /// simply yields no combined value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(WeightSetParseError::WrongCount(parts.len()));
        }

        let mut weights = [0u32; 4];
        for (slot, part) in weights.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| WeightSetParseError::InvalidWeight((*part).to_string()))?;
        }

        Ok(Self::new(weights[0], weights[1], weights[2], weights[3]))
    }
}

/// Blend all four estimates by weight.
///
/// Returns `None` unless the weights sum to exactly 100 and every estimate is
/// defined. A missing estimate is never counted as zero.
pub fn combine(estimates: &ValuationEstimates, weights: &WeightSet) -> Option<f64> {
    if !weights.is_valid() {
        tracing::debug!(total = weights.total(), "weights do not sum to 100");
        return None;
    }

    let weighted = estimates.iter().try_fold(0.0, |acc, estimate| {
        estimate
            .value
            .map(|v| acc + v * f64::from(weights.get(estimate.method)))
    })?;

    Some(round2(weighted / f64::from(WEIGHT_TOTAL)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn estimates() -> ValuationEstimates {
        ValuationEstimates {
            ev: Some(100.0),
            dcf: Some(90.0),
            graham: Some(80.0),
            pe: Some(70.0),
        }
    }

    #[test]
    fn test_reference_blend() {
        assert_eq!(combine(&estimates(), &WeightSet::new(30, 30, 20, 20)), Some(86.0));
    }

    #[test]
    fn test_single_method_weight() {
        assert_eq!(combine(&estimates(), &WeightSet::new(0, 0, 100, 0)), Some(80.0));
    }

    #[rstest]
    #[case(WeightSet::new(30, 30, 20, 19))]
    #[case(WeightSet::new(30, 30, 20, 21))]
    #[case(WeightSet::new(0, 0, 0, 0))]
    #[case(WeightSet::new(100, 100, 0, 0))]
    #[case(WeightSet::new(u32::MAX, 101, 0, 0))]
    #[case(WeightSet::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX))]
    fn test_invalid_weights(#[case] weights: WeightSet) {
        assert_eq!(combine(&estimates(), &weights), None);
    }

    #[test]
    fn test_missing_estimate_is_not_zero() {
        let partial = ValuationEstimates {
            graham: None,
            ..estimates()
        };
        assert_eq!(combine(&partial, &WeightSet::default()), None);

        // even with zero weight on the missing method
        assert_eq!(combine(&partial, &WeightSet::new(40, 40, 0, 20)), None);
    }

    #[test]
    fn test_default_weights() {
        let weights = WeightSet::default();
        assert_eq!(weights, WeightSet::new(30, 30, 20, 20));
        assert!(weights.is_valid());
        assert_eq!(weights.to_string(), "30,30,20,20");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "25, 25, 25, 25".parse::<WeightSet>(),
            Ok(WeightSet::new(25, 25, 25, 25))
        );
        assert_eq!(
            "30,30,20".parse::<WeightSet>(),
            Err(WeightSetParseError::WrongCount(3))
        );
        assert_eq!(
            "30,30,20,x".parse::<WeightSet>(),
            Err(WeightSetParseError::InvalidWeight("x".to_string()))
        );
        assert!("30,30,20,-5".parse::<WeightSet>().is_err());

        // off-total sets parse but are not valid
        let off = "50,50,50,50".parse::<WeightSet>().unwrap();
        assert!(!off.is_valid());
    }

    #[test]
    fn test_huge_weights_do_not_wrap() {
        // wraps to exactly 100 in u32 arithmetic
        let weights = "4294967295,101,0,0".parse::<WeightSet>().unwrap();
        assert_eq!(weights.total(), u64::from(u32::MAX) + 101);
        assert!(!weights.is_valid());
        assert_eq!(combine(&estimates(), &weights), None);
    }
}
