//! We Are Hunted API configuration types

use url::Url;

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

/// Public API root
const DEFAULT_BASE_URL: &str = "http://wearehunted.com/api";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_USER_AGENT: &str = "wearehunted-rs/0.1";

/// We Are Hunted client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntedConfig {
    /// API root, without trailing slash (e.g. `http://wearehunted.com/api`)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl HuntedConfig {
    /// Load configuration from environment variables
    ///
    /// - `WEAREHUNTED_URL` (default `http://wearehunted.com/api`)
    /// - `WEAREHUNTED_TIMEOUT` (default 10)
    /// - `WEAREHUNTED_CONNECT_TIMEOUT` (default 5)
    /// - `WEAREHUNTED_USER_AGENT`
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            base_url: get_env_or_default("WEAREHUNTED_URL", DEFAULT_BASE_URL),
            timeout_secs: parse_env("WEAREHUNTED_TIMEOUT", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_env(
                "WEAREHUNTED_CONNECT_TIMEOUT",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            user_agent: get_env_or_default("WEAREHUNTED_USER_AGENT", DEFAULT_USER_AGENT),
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration with a custom base URL (useful for testing)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            base_url: url.into(),
            ..Self::default()
        }
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> ConfigResult<()> {
        let parsed = Url::parse(self.base_url.trim()).map_err(|e| {
            ConfigError::InvalidUrl("WEAREHUNTED_URL".to_string(), e.to_string())
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidUrl(
                "WEAREHUNTED_URL".to_string(),
                format!("unsupported scheme '{}'", other),
            )),
        }
    }

    /// Get the full URL for an endpoint path (which may carry a query string)
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }
}

impl Default for HuntedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
