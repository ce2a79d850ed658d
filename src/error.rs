//! Error types for CrowdFiber Kit
//!
//! Every failure produced by the client surfaces as exactly one variant of
//! [`Error`]. Nothing is retried automatically; callers that want a retry
//! re-invoke the operation that failed.

use thiserror::Error;

/// The main error type for CrowdFiber Kit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Server Errors
    // ============================================================================
    /// Non-2xx response (other than 404); carries the body text verbatim
    #[error("Error message from server: {0}")]
    ServerMessage(String),

    #[error("Server did not return a response body")]
    EmptyResponseBody,

    #[error("The requested resource was not found")]
    ResourceNotFound,

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("Failed to encode request body: {detail}")]
    Encode { detail: String },

    /// The raw body is kept so callers can see what the server actually sent
    #[error("Failed to decode response: {detail} (raw body: {raw_body})")]
    Decode { detail: String, raw_body: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP transport error: {detail}")]
    Transport { detail: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a server message error
    pub fn server_message(message: impl Into<String>) -> Self {
        Self::ServerMessage(message.into())
    }

    /// Create an encode error
    pub fn encode(detail: impl Into<String>) -> Self {
        Self::Encode {
            detail: detail.into(),
        }
    }

    /// Create a decode error that keeps the raw response body
    pub fn decode(detail: impl Into<String>, raw_body: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
            raw_body: raw_body.into(),
        }
    }

    /// Create a transport error
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Create a generic error
    pub fn other(detail: impl Into<String>) -> Self {
        Self::Other(detail.into())
    }

    /// Check if this error means the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound)
    }

    /// Raw response body attached to a decode failure
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Decode { raw_body, .. } => Some(raw_body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Other(format!("Invalid URL: {err}"))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Other(format!("Failed to parse YAML config: {err}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(format!("IO error: {err}"))
    }
}

/// Result type alias for CrowdFiber Kit
pub type Result<T> = std::result::Result<T, Error>;
