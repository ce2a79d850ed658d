//! Transport contract
//!
//! The client never talks to the network directly. Everything goes through a
//! [`Transport`], which takes an [`HttpRequest`] and hands back an
//! [`HttpResponse`] or a [`TransportError`]. The reqwest-backed implementation
//! lives in `client.rs`; tests plug in scripted transports.

use crate::types::Method;
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Failure below the HTTP layer (DNS, connect, TLS, timeout, body read)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description
    pub message: String,
}

impl TransportError {
    /// Create a new transport error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Ordered header list with case-insensitive lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header list
    pub fn new() -> Self {
        Self::default()
    }

    /// The headers every API request carries: `Accept: application/json`
    pub fn accept_json() -> Self {
        Self::new().with("Accept", "application/json")
    }

    /// Look up a header value, ignoring ASCII case of the name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Set a header, replacing any existing value with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Add a header, joining it onto an existing value of the same name
    /// with `", "` so repeated response lines read as one field
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            Some(entry) => {
                entry.1.push_str(", ");
                entry.1.push_str(&value);
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Combine two header lists; `other` wins on name collisions
    #[must_use]
    pub fn merged(&self, other: &Headers) -> Headers {
        let mut out = self.clone();
        for (name, value) in &other.entries {
            out.insert(name.clone(), value.clone());
        }
        out
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no headers
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a request with no headers and no body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Headers::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Replace the request headers
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Set the request body
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response returned by a [`Transport`]
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    /// `None` when the server sent no body at all
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    /// Create a response with the given status and no body
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Builder-style header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Builder-style body
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Something that can send an HTTP request
///
/// Implementations carry no iteration state and may be shared between any
/// number of sequences.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for the full response
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}
