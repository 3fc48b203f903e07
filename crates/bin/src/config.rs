//! Valuation config from an optional JSON file plus command-line overrides.

use fairval_valuation::ValuationConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Rate overrides given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RateOverrides {
    pub(crate) ev_growth: Option<f64>,
    pub(crate) dcf_growth: Option<f64>,
    pub(crate) discount: Option<f64>,
}

/// Parse a config file. Missing keys take their defaults.
fn read_config(path: &Path) -> Result<ValuationConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Defaults, then the file, then the flags.
pub(crate) fn load_config(
    path: Option<&Path>,
    overrides: RateOverrides,
) -> Result<ValuationConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ValuationConfig::default(),
    };

    if let Some(g) = overrides.ev_growth {
        config.ev_growth_rate = g;
    }
    if let Some(g) = overrides.dcf_growth {
        config.dcf_growth_rate = g;
    }
    if let Some(d) = overrides.discount {
        config.discount_rate = d;
    }

    tracing::debug!(?config, "valuation config");
    Ok(config)
}
