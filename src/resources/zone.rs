//! Service zones

use super::sequence::{IntoResource, ResourceSequence};
use crate::context::ApiContext;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Polygon rings of `[longitude, latitude]` positions
pub type Polygon = Vec<Vec<Vec<f64>>>;

/// Sequence over every zone
pub type ZoneSequence = ResourceSequence<ZoneRecord, Zone>;

/// Zone classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneType {
    #[serde(rename = "in_service")]
    InService,
    #[serde(rename = "nonpublic")]
    NonPublic,
    #[serde(rename = "extended")]
    Extended,
    #[serde(rename = "reference")]
    Reference,
    #[serde(rename = "remote")]
    Remote,
}

impl ZoneType {
    /// Map a human-facing label (as used in exported zone sheets)
    ///
    /// Unrecognised labels map to [`ZoneType::Remote`].
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "in-service" => Self::InService,
            "private" => Self::NonPublic,
            "pre-registration" => Self::Extended,
            "reference" => Self::Reference,
            _ => Self::Remote,
        }
    }

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InService => "in_service",
            Self::NonPublic => "nonpublic",
            Self::Extended => "extended",
            Self::Reference => "reference",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone as decoded from the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneRecord {
    pub id: u64,
    pub name: String,
    pub zone_type: ZoneType,
    #[serde(default)]
    pub zone_color: Option<String>,
    #[serde(default)]
    pub dynamic_fields: Option<JsonObject>,
}

impl IntoResource<Zone> for ZoneRecord {
    fn into_resource(self, ctx: &ApiContext) -> Zone {
        Zone {
            id: self.id,
            name: self.name,
            zone_type: self.zone_type,
            color: self.zone_color,
            dynamic_fields: self.dynamic_fields,
            ctx: ctx.clone(),
        }
    }
}

/// A service zone
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: u64,
    pub name: String,
    pub zone_type: ZoneType,
    pub color: Option<String>,
    pub dynamic_fields: Option<JsonObject>,
    ctx: ApiContext,
}

/// Fields for creating a zone
#[derive(Debug, Clone, PartialEq)]
pub struct NewZone {
    pub name: String,
    pub zone_type: ZoneType,
    pub color: Option<String>,
    pub geometry: Option<Polygon>,
    pub dynamic_fields: Option<JsonObject>,
}

impl NewZone {
    pub fn new(name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            name: name.into(),
            zone_type,
            color: None,
            geometry: None,
            dynamic_fields: None,
        }
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn geometry(mut self, geometry: Polygon) -> Self {
        self.geometry = Some(geometry);
        self
    }

    #[must_use]
    pub fn dynamic_fields(mut self, fields: JsonObject) -> Self {
        self.dynamic_fields = Some(fields);
        self
    }
}

/// Request body for create and update
#[derive(Debug, Serialize)]
struct ZonePayload<'a> {
    name: &'a str,
    zone_type: ZoneType,
    #[serde(skip_serializing_if = "Option::is_none")]
    zone_color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_fields: Option<&'a JsonObject>,
}

impl<'a> ZonePayload<'a> {
    fn new(
        name: &'a str,
        zone_type: ZoneType,
        color: Option<&'a str>,
        geometry: Option<&Polygon>,
        dynamic_fields: Option<&'a JsonObject>,
    ) -> Result<Self> {
        Ok(Self {
            name,
            zone_type,
            zone_color: color,
            geom: geometry.map(polygon_geojson).transpose()?,
            dynamic_fields,
        })
    }
}

/// Serialize rings as a GeoJSON Polygon string, the form `geom` expects
pub(crate) fn polygon_geojson(rings: &Polygon) -> Result<String> {
    serde_json::to_string(&json!({
        "type": "Polygon",
        "coordinates": rings,
    }))
    .map_err(|e| Error::encode(e.to_string()))
}

impl Zone {
    /// Every zone, 50 per page
    pub fn all(ctx: &ApiContext) -> Result<ZoneSequence> {
        let url = ctx.collection(&["zones"])?;
        Ok(ResourceSequence::new(ctx.sequence(url), ctx.clone()))
    }

    /// Fetch a single zone
    pub async fn find(ctx: &ApiContext, id: u64) -> Result<Zone> {
        let id = id.to_string();
        let url = ctx.endpoint(&["zones", id.as_str()])?;
        let record: ZoneRecord = ctx.get(url).await?;
        Ok(record.into_resource(ctx))
    }

    /// Create a zone and return it as stored by the server
    pub async fn create(ctx: &ApiContext, zone: &NewZone) -> Result<Zone> {
        let payload = ZonePayload::new(
            &zone.name,
            zone.zone_type,
            zone.color.as_deref(),
            zone.geometry.as_ref(),
            zone.dynamic_fields.as_ref(),
        )?;
        let url = ctx.endpoint(&["zones"])?;
        let record: ZoneRecord = ctx.send_json(Method::POST, url, &payload).await?;
        Ok(record.into_resource(ctx))
    }

    /// The zone boundary as GeoJSON
    pub async fn geo_json(&self) -> Result<JsonValue> {
        let id = self.id.to_string();
        let url = self.ctx.endpoint(&["zones", id.as_str(), "geojson"])?;
        self.ctx.get(url).await
    }

    /// Save this zone's current fields, replacing its boundary with `geometry`
    /// when given
    pub async fn update(&self, geometry: Option<&Polygon>) -> Result<()> {
        let payload = ZonePayload::new(
            &self.name,
            self.zone_type,
            self.color.as_deref(),
            geometry,
            self.dynamic_fields.as_ref(),
        )?;
        let id = self.id.to_string();
        let url = self.ctx.endpoint(&["zones", id.as_str()])?;
        self.ctx.send_json_unit(Method::PUT, url, &payload).await
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Type: {}", self.zone_type)?;
        write!(f, "Color: {}", self.color.as_deref().unwrap_or("(No color)"))
    }
}
