//! Client configuration.
//!
//! Settings come from explicit values or from the environment (a `.env`
//! file is honoured):
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `SKOSMOS_HOST_URI` | REST API base URI | unset |
//! | `SKOSMOS_TIMEOUT_SECS` | request timeout | 30 |
//! | `SKOSMOS_USER_AGENT` | user agent header | `skosview/<version>` |

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use skosview_core::defaults;
use thiserror::Error;
use tracing::debug;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The base URI of the Skosmos API has not been set")]
    MissingBaseUri,

    #[error("Invalid Skosmos base URI {0:?}: {1}")]
    InvalidBaseUri(String, String),

    #[error("Invalid value for {0}: {1:?}")]
    InvalidValue(&'static str, String),
}

impl From<ConfigError> for skosview_core::Error {
    fn from(e: ConfigError) -> Self {
        skosview_core::Error::Config(e.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for [`crate::SkosmosClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST API base URI, e.g. `https://api.finto.fi/rest/v1`.
    pub base_uri: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: None,
            timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load settings from the environment, reading `.env` first.
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(uri) = lookup(defaults::ENV_HOST_URI).filter(|v| !v.trim().is_empty()) {
            config.base_uri = Some(uri);
        }
        if let Some(raw) = lookup(defaults::ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue(defaults::ENV_TIMEOUT_SECS, raw))?;
        }
        if let Some(agent) = lookup(defaults::ENV_USER_AGENT).filter(|v| !v.is_empty()) {
            config.user_agent = agent;
        }

        debug!(
            subsystem = "client",
            uri = ?config.base_uri,
            timeout_secs = config.timeout_secs,
            "Loaded Skosmos client configuration"
        );
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The validated base URI without a trailing slash.
    pub fn base_uri(&self) -> ConfigResult<String> {
        let raw = self
            .base_uri
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingBaseUri)?;

        let parsed = url::Url::parse(raw)
            .map_err(|e| ConfigError::InvalidBaseUri(raw.to_string(), e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUri(
                raw.to_string(),
                "scheme must be http or https".to_string(),
            ));
        }
        Ok(raw.trim_end_matches('/').to_string())
    }
}
