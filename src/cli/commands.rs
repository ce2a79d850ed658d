//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CrowdFiber API client
#[derive(Parser, Debug)]
#[command(name = "crowdfiber")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML). Falls back to CROWDFIBER_* environment
    /// variables when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every zone
    Zones {
        /// Stop after this many zones
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one zone
    Zone {
        /// Zone ID
        id: u64,

        /// Also print the zone boundary as GeoJSON
        #[arg(long)]
        geojson: bool,
    },

    /// List addresses, optionally filtered
    Addresses {
        /// Only addresses in this zone
        #[arg(long)]
        zone: Option<u64>,

        /// Filter on active service
        #[arg(long)]
        active: Option<bool>,

        /// Filter on having orders
        #[arg(long)]
        orders: Option<bool>,

        /// Filter on vacancy
        #[arg(long)]
        vacant: Option<bool>,

        /// Stop after this many addresses
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List every order
    Orders {
        /// Stop after this many orders
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List notes, for one address or all
    Notes {
        /// Only notes on this address
        #[arg(long)]
        address: Option<u64>,

        /// Stop after this many notes
        #[arg(long)]
        limit: Option<usize>,
    },
}
