//! Validator tunables.
//!
//! Loaded from a JSON file; every field is optional. The CLI passes an explicit
//! path, otherwise [`CONFIG_PATH_ENV`] is consulted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "RGS_VALIDATOR_CONFIG_PATH";

/// Absolute tolerance for `payout == basePayout * appliedMultiplier / 100`.
pub const DEFAULT_PAYOUT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Allowed drift between declared and derived win-info payout
    #[serde(default = "default_payout_tolerance")]
    pub payout_tolerance: f64,

    /// Validate rounds on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_payout_tolerance() -> f64 {
    DEFAULT_PAYOUT_TOLERANCE
}
fn default_parallel() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self { payout_tolerance: DEFAULT_PAYOUT_TOLERANCE, parallel: true }
    }
}

impl ValidatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&content)
    }

    /// Config from the file named by [`CONFIG_PATH_ENV`]; defaults when unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        tracing::debug!(path, "loading validator config from {}", CONFIG_PATH_ENV);
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.payout_tolerance.is_finite() || self.payout_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "payout_tolerance must be a finite value >= 0, got {}",
                self.payout_tolerance
            )));
        }
        Ok(())
    }
}
