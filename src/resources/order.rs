//! Service orders

use super::address::{Address, AddressRecord};
use super::sequence::{IntoResource, ResourceSequence};
use crate::context::ApiContext;
use crate::error::Result;
use serde::Deserialize;

/// Sequence over every order
pub type OrderSequence = ResourceSequence<OrderRecord, Order>;

/// Order as decoded from the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    pub id: u64,
    #[serde(default)]
    pub zone_id: Option<u64>,
    #[serde(default)]
    pub addresses: Vec<AddressRecord>,
}

impl IntoResource<Order> for OrderRecord {
    fn into_resource(self, ctx: &ApiContext) -> Order {
        Order {
            id: self.id,
            zone_id: self.zone_id,
            addresses: self
                .addresses
                .into_iter()
                .map(|address| address.into_resource(ctx))
                .collect(),
        }
    }
}

/// A service order and the addresses it covers
#[derive(Debug, Clone)]
pub struct Order {
    pub id: u64,
    pub zone_id: Option<u64>,
    pub addresses: Vec<Address>,
}

impl Order {
    /// Every order, 50 per page
    pub fn all(ctx: &ApiContext) -> Result<OrderSequence> {
        let url = ctx.collection(&["orders"])?;
        Ok(ResourceSequence::new(ctx.sequence(url), ctx.clone()))
    }

    /// Fetch a single order
    pub async fn from_id(ctx: &ApiContext, id: u64) -> Result<Order> {
        let id = id.to_string();
        let url = ctx.endpoint(&["orders", id.as_str()])?;
        let record: OrderRecord = ctx.get(url).await?;
        Ok(record.into_resource(ctx))
    }
}
