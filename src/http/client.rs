//! reqwest-backed transport
//!
//! Sends one request per call. There is no retry or backoff here: transport
//! failures propagate to the caller immediately. An optional rate limiter
//! throttles outgoing requests.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{Headers, HttpRequest, HttpResponse, Transport, TransportError};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: None,
            user_agent: format!("crowdfiber-kit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpTransportConfig {
    /// Create a new config builder
    pub fn builder() -> HttpTransportConfigBuilder {
        HttpTransportConfigBuilder::default()
    }
}

/// Builder for HTTP transport config
#[derive(Default)]
pub struct HttpTransportConfigBuilder {
    config: HttpTransportConfig,
}

impl HttpTransportConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpTransportConfig {
        self.config
    }
}

/// HTTP transport over reqwest
pub struct HttpTransport {
    client: Client,
    config: HttpTransportConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let method = request.method;
        let url = request.url;

        let mut req = self.client.request(method.into(), url.clone());
        for (name, value) in request.headers.iter() {
            req = req.header(name, value);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            Some(bytes.to_vec())
        };

        debug!("{} {} -> {}", method, url, status);

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
