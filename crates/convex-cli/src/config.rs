//! Runner configuration.
//!
//! Loaded from an optional TOML file. Every section and key may be omitted:
//!
//! ```toml
//! log_level = "debug"
//!
//! [defaults]
//! frequency = "annual"
//! day_count = "thirty_e_360"
//!
//! [solver]
//! max_iterations = 50
//! upper_bound = 1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use convex_bonds::pricing::SolverSettings;

use crate::error::{CliError, CliResult};

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log filter used when neither `--log-level` nor `RUST_LOG` is set.
    pub log_level: Option<String>,

    /// Values used when a request omits an optional field.
    pub defaults: RequestDefaults,

    /// Yield solver limits.
    pub solver: SolverSettings,
}

/// Defaults for optional request fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    /// Coupon frequency name.
    #[serde(default = "default_frequency")]
    pub frequency: String,

    /// Day count convention name.
    #[serde(default = "default_day_count")]
    pub day_count: String,
}

fn default_frequency() -> String {
    "semi_annual".to_string()
}

fn default_day_count() -> String {
    "act_act_isda".to_string()
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            day_count: default_day_count(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            CliError::Config { reason, .. } => CliError::Config {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CliError::Config {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        config.solver.validate()?;
        Ok(config)
    }
}
