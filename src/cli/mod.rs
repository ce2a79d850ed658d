//! CLI module
//!
//! Command-line interface for browsing a CrowdFiber instance.
//!
//! # Commands
//!
//! - `zones` - List every zone with the page it came from
//! - `zone` - Show one zone (optionally with its GeoJSON boundary)
//! - `addresses` - List addresses, filtered by zone/service/orders/vacancy
//! - `orders` - List every order
//! - `notes` - List notes, globally or for one address

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
