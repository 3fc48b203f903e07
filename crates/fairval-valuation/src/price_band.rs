//! Entry/exit price band from trailing price extremes.
//!
//! Entry sits 5% above the window low and exit 5% below the window high. No
//! ordering between the two is enforced.

use crate::inputs::PriceHistoryWindow;
use crate::round2;
use serde::{Deserialize, Serialize};

/// Markup applied to the window low.
pub const ENTRY_MARKUP: f64 = 1.05;

/// Markdown applied to the window high.
pub const EXIT_MARKDOWN: f64 = 0.95;

/// Suggested trading band. Every field is `None` when no history is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    /// Highest high in the window, rounded to cents
    pub high: Option<f64>,
    /// Lowest low in the window, rounded to cents
    pub low: Option<f64>,
    /// Suggested entry price
    pub entry: Option<f64>,
    /// Suggested exit price
    pub exit: Option<f64>,
}

/// Derive the band from raw extremes. A zero extreme counts as unavailable.
pub fn price_band_from_extremes(high: Option<f64>, low: Option<f64>) -> PriceBand {
    let high = high.filter(|h| *h != 0.0);
    let low = low.filter(|l| *l != 0.0);

    PriceBand {
        high: high.map(round2),
        low: low.map(round2),
        entry: low.map(|l| round2(l * ENTRY_MARKUP)),
        exit: high.map(|h| round2(h * EXIT_MARKDOWN)),
    }
}

/// Derive the band from a trailing price window.
pub fn estimate_price_band(history: &PriceHistoryWindow) -> PriceBand {
    price_band_from_extremes(history.max_high(), history.min_low())
}
