//! HTTP module
//!
//! Provides the transport contract, a reqwest-backed transport, and the
//! response handling shared by every API call.
//!
//! # Features
//!
//! - **Pluggable Transport**: anything implementing [`Transport`]
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Error Mapping**: status codes and decode failures map onto [`crate::Error`]

mod client;
mod handle;
mod rate_limit;
mod transport;

pub use client::{HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder};
pub use handle::{check_status, handle_response, send_and_check, send_and_handle};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{Headers, HttpRequest, HttpResponse, Transport, TransportError};
