//! Runtime configuration read from the environment.

use std::{env, time::Duration};

use thiserror::Error;

use crate::infra::estimator::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const BASE_URL_VAR: &str = "KALA_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "KALA_API_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    Parse { key: String, details: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the backend serving `/api/ai/analyze-pricing`.
    pub api_base_url: String,
    pub api_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = env::var(BASE_URL_VAR)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.api_base_url);
        if let Err(err) = url::Url::parse(&api_base_url) {
            return Err(ConfigError::Parse {
                key: BASE_URL_VAR.to_string(),
                details: err.to_string(),
            });
        }

        let api_timeout = match env::var(TIMEOUT_VAR) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|err| ConfigError::Parse {
                    key: TIMEOUT_VAR.to_string(),
                    details: err.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.api_timeout,
        };

        Ok(Self {
            api_base_url,
            api_timeout,
        })
    }

    /// Falls back to defaults, logging why, when the environment is invalid.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid configuration; using defaults");
            Self::default()
        })
    }
}
