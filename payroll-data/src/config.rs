//! Settings file for the `payroll-calc` binary.
//!
//! ```toml
//! log_filter = "info"
//! format = "json"
//!
//! [rates]
//! personal_deduction = 11000000
//! dependent_deduction = 4400000
//! ```
//!
//! Every key is optional. Rates left out of `[rates]` keep their standard
//! values.

use std::path::Path;

use payroll_core::StatutoryRates;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How computed records are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: Option<String>,
    pub format: OutputFormat,
    pub rates: StatutoryRates,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
