//! Client configuration
//!
//! A [`ClientConfig`] can be loaded from YAML or from the environment:
//!
//! ```yaml
//! base_url: https://your-org.crowdfiber.com/api/v2/
//! auth:
//!   type: token
//!   token: abc123
//! per_page: 50
//! timeout_seconds: 30
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::auth::AuthConfig;
use crate::context::{ApiContext, DEFAULT_PER_PAGE};
use crate::error::{Error, Result};
use crate::http::{HttpTransport, HttpTransportConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// API root URL
pub const ENV_BASE_URL: &str = "CROWDFIBER_BASE_URL";
/// API token (takes precedence over username/password)
pub const ENV_TOKEN: &str = "CROWDFIBER_TOKEN";
pub const ENV_USERNAME: &str = "CROWDFIBER_USERNAME";
pub const ENV_PASSWORD: &str = "CROWDFIBER_PASSWORD";

/// Everything needed to talk to one CrowdFiber instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://your-org.crowdfiber.com/api/v2/`
    pub base_url: String,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Page size for collection requests
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Client-side throttling (off when omitted)
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_timeout_seconds() -> u64 {
    30
}

impl ClientConfig {
    /// Config with default paging and timeout
    pub fn new(base_url: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            base_url: base_url.into(),
            auth,
            per_page: default_per_page(),
            timeout_seconds: default_timeout_seconds(),
            rate_limit: None,
        }
    }

    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Build from `CROWDFIBER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = var(ENV_BASE_URL)
            .ok_or_else(|| Error::other(format!("{ENV_BASE_URL} is not set")))?;

        let auth = match (var(ENV_TOKEN), var(ENV_USERNAME), var(ENV_PASSWORD)) {
            (Some(token), _, _) => AuthConfig::token(token),
            (None, Some(username), Some(password)) => AuthConfig::basic(username, password),
            (None, Some(_), None) => {
                return Err(Error::other(format!(
                    "{ENV_USERNAME} is set but {ENV_PASSWORD} is not"
                )))
            }
            (None, None, _) => AuthConfig::None,
        };

        let config = Self::new(base_url, auth);
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;
        if self.per_page == 0 {
            return Err(Error::other("per_page must be at least 1"));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::other("timeout_seconds must be at least 1"));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::other("rate_limit.requests_per_second must be at least 1"));
            }
        }
        Ok(())
    }

    /// Parsed base URL, always ending in `/` so relative joins stay under it
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Transport settings derived from this config
    pub fn transport_config(&self) -> HttpTransportConfig {
        let builder = HttpTransportConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));
        let builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }

    /// Build a context backed by [`HttpTransport`]
    pub fn into_context(self) -> Result<ApiContext> {
        self.validate()?;
        let base_url = self.parsed_base_url()?;
        let transport = HttpTransport::with_config(self.transport_config())?;
        Ok(ApiContext::new(base_url, self.auth, Arc::new(transport)).with_per_page(self.per_page))
    }
}
