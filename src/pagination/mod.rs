//! Pagination module
//!
//! Supports: page-number collections described by `Link` and `X-Total-Count`
//! response headers
//!
//! # Overview
//!
//! - [`parse_link_header`] turns a `Link` header into relation links
//! - [`fetch_page`] performs one GET and decodes a JSON array page
//! - [`PaginatedSequence`] drives page fetches lazily and yields one element
//!   at a time with a [`PaginationMetadata`] snapshot

mod fetcher;
mod link;
mod sequence;
mod types;

pub use fetcher::{fetch_page, LINK_HEADER, TOTAL_COUNT_HEADER};
pub use link::{find_link, parse_link_header, LinkRelation, PaginationLink};
pub use sequence::PaginatedSequence;
pub use types::{PageResult, PageStamp, PaginationMetadata, QueryPageStamp};

#[cfg(test)]
mod tests;
