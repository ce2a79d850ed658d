//! CrowdFiber resources
//!
//! Each resource is decoded into a wire record (field names as the API sends
//! them) and converted into a public type that keeps an [`ApiContext`] for
//! follow-up requests.
//!
//! | Resource | Collection | Single |
//! |----------|------------|--------|
//! | [`Zone`] | `zones` | `zones/{id}` (+ `geojson`, create, update) |
//! | [`Address`] | `addresses` (filtered) | `addresses/{id}` |
//! | [`Order`] | `orders` | `orders/{id}` |
//! | [`Note`] | `notes`, `addresses/{id}/notes` | |
//!
//! [`ApiContext`]: crate::context::ApiContext

mod address;
mod note;
mod order;
mod sequence;
mod zone;

pub use address::{Address, AddressDetails, AddressQuery, AddressRecord, AddressSequence};
pub use note::{Note, NoteSequence};
pub use order::{Order, OrderRecord, OrderSequence};
pub use sequence::{IntoResource, ResourceSequence};
pub use zone::{NewZone, Polygon, Zone, ZoneRecord, ZoneSequence, ZoneType};
