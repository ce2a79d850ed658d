//! Lazily paginated sequence
//!
//! [`PaginatedSequence`] turns a collection URL into a stream of decoded
//! elements. Pages are fetched one at a time, only when the buffered page
//! has been fully drained, and elements come out in page-then-position order.
//!
//! ```text
//!   NotStarted ──fetch──▶ Buffered ──drain──▶ (next link?) ──fetch──▶ Buffered
//!        │                   │                     │
//!        └──── empty ────────┴──── no next ────────┴──── empty ──▶ Exhausted
//! ```
//!
//! Exhausted is terminal. A failed fetch commits nothing, so calling
//! [`PaginatedSequence::next`] again retries the same page.

use super::fetcher::fetch_page;
use super::types::{PageResult, PageStamp, PaginationMetadata, QueryPageStamp};
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{Headers, Transport};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NotStarted,
    Buffered,
    Exhausted,
}

/// Stateful cursor over a paginated collection of `E`
pub struct PaginatedSequence<E> {
    url: Url,
    auth: Arc<AuthConfig>,
    transport: Arc<dyn Transport>,
    default_headers: Headers,
    page_stamp: Box<dyn PageStamp>,
    /// Elements of the current page; taken slots are `None`
    buffer: Vec<Option<E>>,
    /// Index into `buffer` of the next element to yield
    cursor: usize,
    current_page: u32,
    total_pages: Option<u32>,
    total_objects: Option<u64>,
    has_next_page: bool,
    state: State,
}

impl<E: DeserializeOwned> PaginatedSequence<E> {
    /// Create a sequence starting at `url`. No request is made until the
    /// first call to [`next`](Self::next).
    pub fn new(url: Url, auth: impl Into<Arc<AuthConfig>>, transport: Arc<dyn Transport>) -> Self {
        Self {
            url,
            auth: auth.into(),
            transport,
            default_headers: Headers::accept_json(),
            page_stamp: Box::new(QueryPageStamp::default()),
            buffer: Vec::new(),
            cursor: 0,
            current_page: 1,
            total_pages: None,
            total_objects: None,
            has_next_page: false,
            state: State::NotStarted,
        }
    }

    /// Replace the headers sent with every page request (auth headers are
    /// merged on top)
    #[must_use]
    pub fn with_default_headers(mut self, headers: Headers) -> Self {
        self.default_headers = headers;
        self
    }

    /// Replace the page-number strategy
    #[must_use]
    pub fn with_page_stamp(mut self, stamp: impl PageStamp + 'static) -> Self {
        self.page_stamp = Box::new(stamp);
        self
    }

    /// Yield the next element, fetching a new page if the buffer is drained
    ///
    /// Returns `Ok(None)` once the collection is exhausted, and on every
    /// call after that.
    pub async fn next(&mut self) -> Result<Option<(E, PaginationMetadata)>> {
        match self.state {
            State::Exhausted => return Ok(None),
            State::NotStarted => {
                let mut url = self.url.clone();
                self.page_stamp.stamp(self.current_page, &mut url);
                let page = fetch_page(self.transport.as_ref(), &url, &self.request_headers()).await?;

                self.url = url;
                self.load(page);
                self.state = State::Buffered;

                if self.buffer.is_empty() {
                    self.finish();
                    return Ok(None);
                }
            }
            State::Buffered => {}
        }

        if let Some(item) = self.pop() {
            return Ok(Some(item));
        }

        if !self.has_next_page {
            self.finish();
            return Ok(None);
        }

        let next_page = self.current_page + 1;
        let mut url = self.url.clone();
        self.page_stamp.stamp(next_page, &mut url);
        let page = fetch_page(self.transport.as_ref(), &url, &self.request_headers()).await?;

        self.url = url;
        self.current_page = next_page;
        self.load(page);

        match self.pop() {
            Some(item) => Ok(Some(item)),
            None => {
                self.finish();
                Ok(None)
            }
        }
    }

    /// Drain the whole sequence into a vector
    pub async fn collect_all(mut self) -> Result<Vec<(E, PaginationMetadata)>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Convert into a [`Stream`]. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<(E, PaginationMetadata)>> {
        stream::try_unfold(self, |mut seq| async move {
            let item = seq.next().await?;
            Ok::<_, Error>(item.map(|item| (item, seq)))
        })
    }

    /// Default headers with auth merged on top
    fn request_headers(&self) -> Headers {
        self.default_headers.merged(&self.auth.headers())
    }

    fn load(&mut self, page: PageResult<E>) {
        self.buffer = page.elements.into_iter().map(Some).collect();
        self.cursor = 0;
        self.has_next_page = page.has_next;
        self.total_objects = page.total_objects;
        // The server's page count is assumed stable for the whole iteration
        if self.total_pages.is_none() {
            self.total_pages = page.total_pages;
        }
    }

    fn pop(&mut self) -> Option<(E, PaginationMetadata)> {
        let element = self.buffer.get_mut(self.cursor)?.take()?;
        self.cursor += 1;
        Some((element, self.metadata()))
    }

    fn finish(&mut self) {
        debug!(url = %self.url, page = self.current_page, "Pagination exhausted");
        self.state = State::Exhausted;
        self.buffer.clear();
        self.cursor = 0;
    }
}

impl<E> PaginatedSequence<E> {
    /// Metadata snapshot built from the current counters
    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            current_page: self.current_page,
            total_pages: self.total_pages.unwrap_or(0),
            total_objects: self.total_objects.unwrap_or(0),
        }
    }

    /// URL of the current page
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// 1-based number of the current page
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Index within the current page of the next element to yield, never
    /// greater than [`page_len`](Self::page_len)
    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    /// Number of elements the current page held when it was fetched
    pub fn page_len(&self) -> usize {
        self.buffer.len()
    }

    /// Total pages from the first `last` link seen, if any
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// `X-Total-Count` from the most recent page, if reported
    pub fn total_objects(&self) -> Option<u64> {
        self.total_objects
    }

    /// True once at least one page has been fetched successfully
    pub fn has_fetched(&self) -> bool {
        self.state != State::NotStarted
    }

    /// True once the sequence has terminated
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted
    }
}

impl<E> std::fmt::Debug for PaginatedSequence<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedSequence")
            .field("url", &self.url.as_str())
            .field("state", &self.state)
            .field("current_page", &self.current_page)
            .field("page_len", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("total_pages", &self.total_pages)
            .field("total_objects", &self.total_objects)
            .field("has_next_page", &self.has_next_page)
            .finish_non_exhaustive()
    }
}
