//! Notes attached to CrowdFiber records

use super::sequence::{IntoResource, ResourceSequence};
use crate::context::ApiContext;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Sequence over notes
pub type NoteSequence = ResourceSequence<Note, Note>;

/// A free-text note on an address, order or other record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    /// Kind of record the note belongs to, e.g. `Address`
    #[serde(default)]
    pub notable_type: Option<String>,
    #[serde(default)]
    pub notable_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl IntoResource<Note> for Note {
    fn into_resource(self, _ctx: &ApiContext) -> Note {
        self
    }
}

impl Note {
    /// Every note visible to the caller
    pub fn all(ctx: &ApiContext) -> Result<NoteSequence> {
        let url = ctx.collection(&["notes"])?;
        Ok(ResourceSequence::new(ctx.sequence(url), ctx.clone()))
    }

    /// Notes on one address
    pub fn for_address(ctx: &ApiContext, address_id: u64) -> Result<NoteSequence> {
        let id = address_id.to_string();
        let url = ctx.collection(&["addresses", id.as_str(), "notes"])?;
        Ok(ResourceSequence::new(ctx.sequence(url), ctx.clone()))
    }
}
