// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # CrowdFiber Kit
//!
//! A typed async client for the CrowdFiber REST API.
//!
//! ## Features
//!
//! - **Lazy Pagination**: Collections are walked page by page, driven by
//!   `Link` and `X-Total-Count` headers, only as elements are consumed
//! - **Typed Resources**: Zones, addresses, orders and notes decoded into
//!   Rust types, with create/update/GeoJSON for zones
//! - **Pluggable Transport**: Any [`http::Transport`] can carry requests; a
//!   reqwest-backed one with optional rate limiting is included
//! - **Single Error Taxonomy**: Every failure is one [`Error`] variant
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crowdfiber_kit::{config::ClientConfig, resources::Zone, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = ClientConfig::from_env()?.into_context()?;
//!
//!     let mut zones = Zone::all(&ctx)?;
//!     while let Some((zone, meta)) = zones.next().await? {
//!         println!("Fetched Zone {} (ID: {}) from page {}", zone.name, zone.id, meta.current_page);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Resources                              │
//! │   Zone     Address     Order     Note     ResourceSequence<R,T> │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────────┬───────────────────┐
//! │  ApiContext  │          Pagination          │       Auth        │
//! ├──────────────┼──────────────────────────────┼───────────────────┤
//! │ Base URL     │ Link parser                  │ Token             │
//! │ Headers      │ Page fetcher                 │ Username/password │
//! │ Transport    │ PaginatedSequence<E>         │                   │
//! └──────────────┴──────────────────────────────┴───────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   Transport trait  ·  HttpTransport (reqwest)  ·  Rate limiter  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication headers
pub mod auth;

/// Transport contract, reqwest transport and response handling
pub mod http;

/// URL building helpers
pub mod endpoint;

/// Link-header pagination
pub mod pagination;

/// Shared request context
pub mod context;

/// Zones, addresses, orders and notes
pub mod resources;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use context::ApiContext;
pub use error::{Error, Result};
pub use types::*;
