//! Authentication module
//!
//! Supports: no auth, API token, username/password
//!
//! Auth is a plain value turned into request headers; it holds no
//! per-request state and can be shared by any number of sequences.

mod types;

pub use types::{AuthConfig, AUTHORIZATION};
