//! Service addresses

use super::note::NoteSequence;
use super::sequence::{IntoResource, ResourceSequence};
use super::Note;
use crate::context::ApiContext;
use crate::endpoint::UrlExt;
use crate::error::Result;
use serde::{Deserialize, Deserializer};
use std::fmt;
use url::Url;

/// Sequence over addresses matching an [`AddressQuery`]
pub type AddressSequence = ResourceSequence<AddressRecord, Address>;

/// Numeric fields the API sends as strings (and occasionally as numbers)
#[derive(Deserialize)]
#[serde(untagged)]
enum NumericText {
    Number(i64),
    Text(String),
}

impl NumericText {
    fn parse<T: TryFrom<i64> + std::str::FromStr>(&self) -> Option<T> {
        match self {
            Self::Number(n) => T::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Optional numeric text; unparsable values become `None`
fn lenient_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + std::str::FromStr,
{
    let value: Option<NumericText> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.parse()))
}

/// Required ZIP code; anything that is not an integer fails the decode
fn strict_zip<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumericText::deserialize(deserializer)?;
    value.parse().ok_or_else(|| {
        serde::de::Error::custom(format!(
            "expected ZIP code to be an integer, found \"{}\" instead",
            value.raw()
        ))
    })
}

/// Address as decoded from the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressRecord {
    pub id: u64,
    #[serde(default)]
    pub zone_id: Option<u64>,
    #[serde(default)]
    pub addr_name: Option<String>,
    pub addr_street_address: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub addr_num: Option<i64>,
    #[serde(default)]
    pub addr_pre_dir: Option<String>,
    pub addr_street_name: String,
    #[serde(default)]
    pub addr_type: Option<String>,
    #[serde(default)]
    pub addr_suf_dir: Option<String>,
    pub addr_city: String,
    pub addr_state: String,
    #[serde(deserialize_with = "strict_zip")]
    pub addr_zip: u32,
    #[serde(default, deserialize_with = "lenient_number")]
    pub addr_zip_plus_4: Option<u32>,
    #[serde(default)]
    pub addr_timezone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl IntoResource<Address> for AddressRecord {
    fn into_resource(self, ctx: &ApiContext) -> Address {
        Address {
            id: self.id,
            zone_id: self.zone_id,
            street_address: self.addr_street_address,
            details: AddressDetails {
                name: self.addr_name.clone(),
                number: self.addr_num,
                pre_dir: self.addr_pre_dir,
                street_name: self.addr_street_name,
                street_type: self.addr_type,
                suf_dir: self.addr_suf_dir,
                city: self.addr_city,
                state: self.addr_state,
                zip: self.addr_zip,
                zip_plus_4: self.addr_zip_plus_4,
            },
            name: self.addr_name,
            timezone: self.addr_timezone,
            latitude: self.latitude,
            longitude: self.longitude,
            ctx: ctx.clone(),
        }
    }
}

/// Structured parts of a postal address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDetails {
    pub name: Option<String>,
    /// The "123" in "123 Main St"
    pub number: Option<i64>,
    pub pre_dir: Option<String>,
    pub street_name: String,
    /// `St`, `Ave`, ...
    pub street_type: Option<String>,
    pub suf_dir: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: u32,
    pub zip_plus_4: Option<u32>,
}

impl AddressDetails {
    /// One-line form: `123 Main St, Albany, NY 12207-1234`
    pub fn full_address(&self) -> String {
        let mut out = String::new();
        if let Some(number) = self.number {
            out.push_str(&format!("{number} "));
        }
        out.push_str(&self.street_name);
        if let Some(street_type) = &self.street_type {
            out.push_str(&format!(" {street_type}"));
        }
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push_str(&format!("{}, {} {}", self.city, self.state, self.zip));
        if let Some(plus_4) = self.zip_plus_4 {
            out.push_str(&format!("-{plus_4}"));
        }
        out
    }
}

/// A service address
#[derive(Debug, Clone)]
pub struct Address {
    pub id: u64,
    pub zone_id: Option<u64>,
    pub name: Option<String>,
    /// Street address exactly as stored by the server
    pub street_address: String,
    pub details: AddressDetails,
    pub timezone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    ctx: ApiContext,
}

/// Filters for [`Address::find`]
///
/// Boolean filters are sent as `2` for yes and `1` for no; unset filters are
/// not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressQuery {
    pub zone_id: Option<u64>,
    pub has_active_service: Option<bool>,
    pub has_orders: Option<bool>,
    pub is_vacant: Option<bool>,
}

impl AddressQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn zone(mut self, zone_id: u64) -> Self {
        self.zone_id = Some(zone_id);
        self
    }

    #[must_use]
    pub fn active_service(mut self, active: bool) -> Self {
        self.has_active_service = Some(active);
        self
    }

    #[must_use]
    pub fn orders(mut self, has_orders: bool) -> Self {
        self.has_orders = Some(has_orders);
        self
    }

    #[must_use]
    pub fn vacant(mut self, vacant: bool) -> Self {
        self.is_vacant = Some(vacant);
        self
    }

    /// Write the filters onto `url`
    pub fn apply(&self, url: &mut Url) {
        if let Some(zone_id) = self.zone_id {
            url.set_query_param("with_zones", &zone_id.to_string());
        }
        let flags = [
            ("with_service_active", self.has_active_service),
            ("with_orders", self.has_orders),
            ("with_vacant", self.is_vacant),
        ];
        for (param, flag) in flags {
            if let Some(flag) = flag {
                url.set_query_param(param, if flag { "2" } else { "1" });
            }
        }
    }
}

impl Address {
    /// Addresses matching `query`, 50 per page
    pub fn find(ctx: &ApiContext, query: &AddressQuery) -> Result<AddressSequence> {
        let mut url = ctx.endpoint(&["addresses"])?;
        query.apply(&mut url);
        url.set_query_param("per_page", &ctx.per_page().to_string());
        Ok(ResourceSequence::new(ctx.sequence(url), ctx.clone()))
    }

    /// Fetch a single address
    pub async fn from_id(ctx: &ApiContext, id: u64) -> Result<Address> {
        let id = id.to_string();
        let url = ctx.endpoint(&["addresses", id.as_str()])?;
        let record: AddressRecord = ctx.get(url).await?;
        Ok(record.into_resource(ctx))
    }

    /// Notes attached to this address
    pub fn notes(&self) -> Result<NoteSequence> {
        Note::for_address(&self.ctx, self.id)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name.as_deref().unwrap_or("(No Name)"))?;
        writeln!(f, "Full Address: {}", self.street_address)?;
        writeln!(f, "Full Address (Details): {}", self.details.full_address())?;
        match (self.longitude, self.latitude) {
            (Some(x), Some(y)) => write!(f, "Coordinates (x, y): {x} {y}"),
            _ => write!(f, "Coordinates (x, y): (unknown)"),
        }
    }
}
