//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ClientConfig;
use crate::context::ApiContext;
use crate::resources::{Address, AddressQuery, IntoResource, Note, Order, ResourceSequence, Zone};
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let ctx = self.context()?;
        debug!(?ctx, "Client ready");

        match &self.cli.command {
            Commands::Zones { limit } => {
                list("zones", Zone::all(&ctx)?, *limit, |zone| {
                    format!("Zone {} (ID: {})", zone.name, zone.id)
                })
                .await
            }
            Commands::Zone { id, geojson } => self.zone(&ctx, *id, *geojson).await,
            Commands::Addresses {
                zone,
                active,
                orders,
                vacant,
                limit,
            } => {
                let query = AddressQuery {
                    zone_id: *zone,
                    has_active_service: *active,
                    has_orders: *orders,
                    is_vacant: *vacant,
                };
                list("addresses", Address::find(&ctx, &query)?, *limit, |address| {
                    format!(
                        "Address {} (ID: {})",
                        address.details.full_address(),
                        address.id
                    )
                })
                .await
            }
            Commands::Orders { limit } => {
                list("orders", Order::all(&ctx)?, *limit, |order| {
                    format!(
                        "Order {} ({} addresses)",
                        order.id,
                        order.addresses.len()
                    )
                })
                .await
            }
            Commands::Notes { address, limit } => {
                let notes = match address {
                    Some(id) => Note::for_address(&ctx, *id)?,
                    None => Note::all(&ctx)?,
                };
                list("notes", notes, *limit, |note| {
                    format!(
                        "Note {}: {}",
                        note.id,
                        note.body.as_deref().unwrap_or("(empty)")
                    )
                })
                .await
            }
        }
    }

    /// Load config from `--config` or the environment
    fn context(&self) -> Result<ApiContext> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ClientConfig::from_env()
                .context("No --config given and environment is incomplete")?,
        };
        Ok(config.into_context()?)
    }

    async fn zone(&self, ctx: &ApiContext, id: u64, geojson: bool) -> Result<()> {
        let zone = Zone::find(ctx, id)
            .await
            .with_context(|| format!("Failed to fetch zone {id}"))?;
        println!("{zone}");

        if geojson {
            let shape = zone.geo_json().await?;
            println!("{}", serde_json::to_string_pretty(&shape)?);
        }
        Ok(())
    }
}

/// Print each element with the page it came from, then a summary line
async fn list<R, T, F>(
    kind: &str,
    mut seq: ResourceSequence<R, T>,
    limit: Option<usize>,
    describe: F,
) -> Result<()>
where
    R: IntoResource<T>,
    F: Fn(&T) -> String,
{
    let started = Instant::now();
    let mut count = 0usize;
    let mut announced_total = false;

    while let Some((item, meta)) = seq.next().await? {
        if !announced_total {
            if let Some(total) = meta.known_total_objects() {
                println!("Total {kind}: {total}");
            }
            announced_total = true;
        }

        println!("Fetched {} from page {}", describe(&item), meta.current_page);
        count += 1;

        if limit.is_some_and(|max| count >= max) {
            break;
        }
    }

    println!("Took {:.2?}, fetched {count} {kind}", started.elapsed());
    Ok(())
}
