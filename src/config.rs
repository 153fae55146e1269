//! Configuration management and validation.
//!
//! Service endpoints, HTTP timeout and request concurrency for the NWIS
//! client. Values come from [`Default`], a TOML file, or environment
//! overrides, in that order of precedence from lowest to highest.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_TIMEOUT_SECS, DEFAULT_WATERDATA_URL,
    DEFAULT_WATERSERVICES_URL,
};
use crate::error::{NwisError, Result};

/// Environment variable overriding [`NwisConfig::waterservices_url`]
pub const ENV_WATERSERVICES_URL: &str = "NWIS_WATERSERVICES_URL";
/// Environment variable overriding [`NwisConfig::waterdata_url`]
pub const ENV_WATERDATA_URL: &str = "NWIS_WATERDATA_URL";
/// Environment variable overriding [`NwisConfig::timeout_secs`]
pub const ENV_TIMEOUT_SECS: &str = "NWIS_TIMEOUT_SECS";

/// Global configuration for NWIS retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NwisConfig {
    /// Base URL of the iv/dv/site/gwlevels/stat services
    pub waterservices_url: String,

    /// Base URL of the per-state measurements and peak pages
    pub waterdata_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum requests in flight for one adapter call
    pub max_concurrent_requests: usize,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for NwisConfig {
    fn default() -> Self {
        Self {
            waterservices_url: DEFAULT_WATERSERVICES_URL.to_string(),
            waterdata_url: DEFAULT_WATERDATA_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NwisConfig {
    /// Set the waterservices base URL
    pub fn with_waterservices_url(mut self, url: impl Into<String>) -> Self {
        self.waterservices_url = url.into();
        self
    }

    /// Set the waterdata base URL
    pub fn with_waterdata_url(mut self, url: impl Into<String>) -> Self {
        self.waterdata_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set maximum concurrent requests
    pub fn with_max_concurrent_requests(mut self, max_requests: usize) -> Self {
        self.max_concurrent_requests = max_requests;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: NwisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply `NWIS_*` environment overrides on top of the current values
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(ENV_WATERSERVICES_URL) {
            debug!("{} overrides waterservices URL", ENV_WATERSERVICES_URL);
            self.waterservices_url = url;
        }
        if let Some(url) = lookup(ENV_WATERDATA_URL) {
            debug!("{} overrides waterdata URL", ENV_WATERDATA_URL);
            self.waterdata_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                NwisError::configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check URLs, timeout and concurrency
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("waterservices_url", &self.waterservices_url),
            ("waterdata_url", &self.waterdata_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(NwisError::configuration(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(NwisError::configuration("timeout_secs must be greater than 0"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(NwisError::configuration(
                "max_concurrent_requests must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
