//! Single page fetch
//!
//! One GET, one decode. The headers the caller passes are sent as-is; the
//! sequence is responsible for merging defaults with auth.

use super::link::{find_link, parse_link_header, LinkRelation, PaginationLink};
use super::types::PageResult;
use crate::endpoint::UrlExt;
use crate::error::{Error, Result};
use crate::http::{handle_response, Headers, HttpRequest, Transport};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the collection size
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// Header carrying the pagination links
pub const LINK_HEADER: &str = "Link";

/// Fetch one page and decode its body as a JSON array of `E`
pub async fn fetch_page<E: DeserializeOwned>(
    transport: &dyn Transport,
    url: &Url,
    headers: &Headers,
) -> Result<PageResult<E>> {
    let request = HttpRequest::get(url.clone()).headers(headers.clone());

    let response = transport
        .send(request)
        .await
        .map_err(|e| Error::transport(e.message))?;

    let elements: Vec<E> = handle_response(&response)?;

    let links = response
        .headers
        .get(LINK_HEADER)
        .map(parse_link_header)
        .unwrap_or_default();

    let has_next = find_link(&links, LinkRelation::Next).is_some();
    let total_pages = last_page_number(url, &links);
    let total_objects = total_count(&response.headers);

    debug!(
        url = %url,
        status = response.status,
        elements = elements.len(),
        has_next,
        total_pages = ?total_pages,
        total_objects = ?total_objects,
        "Fetched page"
    );

    Ok(PageResult {
        elements,
        has_next,
        total_pages,
        total_objects,
    })
}

/// Read the `page` parameter of the `last` link, resolving relative URLs
/// against the request URL
fn last_page_number(request_url: &Url, links: &[PaginationLink]) -> Option<u32> {
    let last = find_link(links, LinkRelation::Last)?;

    let url = match request_url.join(&last.url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Ignoring unparsable last link '{}': {}", last.url, e);
            return None;
        }
    };

    let page = url.query_param("page")?;
    match page.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring non-numeric page '{}' in last link", page);
            None
        }
    }
}

fn total_count(headers: &Headers) -> Option<u64> {
    let raw = headers.get(TOTAL_COUNT_HEADER)?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring unparsable {} header: '{}'", TOTAL_COUNT_HEADER, raw);
            None
        }
    }
}
