//! Pagination types and traits

use crate::endpoint::UrlExt;
use url::Url;

/// Snapshot of where a yielded element came from
///
/// `total_pages` and `total_objects` are 0 when the server did not report
/// them. Zero means "unknown", never "definitely empty".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationMetadata {
    /// 1-based page the element was fetched from
    pub current_page: u32,
    pub total_pages: u32,
    pub total_objects: u64,
}

impl PaginationMetadata {
    /// Total page count, if the server reported one
    pub fn known_total_pages(&self) -> Option<u32> {
        (self.total_pages > 0).then_some(self.total_pages)
    }

    /// Total object count, if the server reported a non-zero one
    pub fn known_total_objects(&self) -> Option<u64> {
        (self.total_objects > 0).then_some(self.total_objects)
    }
}

/// One decoded page plus what its headers said about the collection
#[derive(Debug, Clone)]
pub struct PageResult<E> {
    pub elements: Vec<E>,
    /// A `next` link was present
    pub has_next: bool,
    /// `page` parameter of the `last` link
    pub total_pages: Option<u32>,
    /// `X-Total-Count` header
    pub total_objects: Option<u64>,
}

/// Strategy for writing a page number onto a collection URL
pub trait PageStamp: Send + Sync {
    /// Update `url` so that it requests `page`
    fn stamp(&self, page: u32, url: &mut Url);
}

impl<F> PageStamp for F
where
    F: Fn(u32, &mut Url) + Send + Sync,
{
    fn stamp(&self, page: u32, url: &mut Url) {
        self(page, url);
    }
}

/// Sets a query parameter (`page` by default) to the page number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPageStamp {
    pub param: String,
}

impl QueryPageStamp {
    /// Stamp pages into a custom query parameter
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }
}

impl Default for QueryPageStamp {
    fn default() -> Self {
        Self::new("page")
    }
}

impl PageStamp for QueryPageStamp {
    fn stamp(&self, page: u32, url: &mut Url) {
        url.set_query_param(&self.param, &page.to_string());
    }
}
