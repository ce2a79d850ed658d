//! Auth configuration types
//!
//! CrowdFiber accepts either an API token or a username/password pair. Both
//! travel in the `Authorization` header.

use crate::http::Headers;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Name of the header every auth variant writes to
pub const AUTHORIZATION: &str = "Authorization";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API token, sent as `Authorization: Token <token>`
    Token {
        /// The API token
        token: String,
    },

    /// Username and password
    ///
    /// The server expects the conventional basic-auth encoding under the
    /// `Bearer` scheme name: `Authorization: Bearer base64(user:pass)`.
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

impl AuthConfig {
    /// Create token auth
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Create username/password auth
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Headers to attach to every request
    pub fn headers(&self) -> Headers {
        match self {
            AuthConfig::None => Headers::new(),
            AuthConfig::Token { token } => {
                Headers::new().with(AUTHORIZATION, format!("Token {token}"))
            }
            AuthConfig::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                Headers::new().with(AUTHORIZATION, format!("Bearer {encoded}"))
            }
        }
    }

    /// True if requests go out unauthenticated
    pub fn is_none(&self) -> bool {
        matches!(self, AuthConfig::None)
    }
}
