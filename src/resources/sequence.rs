//! Typed sequences over resource collections
//!
//! A [`ResourceSequence`] drives a [`PaginatedSequence`] of raw wire records
//! and converts each one into its public form as it is yielded.

use crate::context::ApiContext;
use crate::error::{Error, Result};
use crate::pagination::{PaginatedSequence, PaginationMetadata};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Conversion from a decoded wire record into a public resource
pub trait IntoResource<T>: DeserializeOwned {
    fn into_resource(self, ctx: &ApiContext) -> T;
}

/// Paginated sequence yielding `T` built from wire records `R`
///
/// Termination and metadata pairing are exactly those of the wrapped
/// [`PaginatedSequence`].
pub struct ResourceSequence<R, T> {
    inner: PaginatedSequence<R>,
    ctx: ApiContext,
    _output: PhantomData<fn() -> T>,
}

impl<R, T> ResourceSequence<R, T>
where
    R: IntoResource<T>,
{
    pub fn new(inner: PaginatedSequence<R>, ctx: ApiContext) -> Self {
        Self {
            inner,
            ctx,
            _output: PhantomData,
        }
    }

    /// Yield the next resource with the metadata of the page it came from
    pub async fn next(&mut self) -> Result<Option<(T, PaginationMetadata)>> {
        let item = self.inner.next().await?;
        Ok(item.map(|(record, meta)| (record.into_resource(&self.ctx), meta)))
    }

    /// Drain the whole sequence into a vector
    pub async fn collect_all(mut self) -> Result<Vec<(T, PaginationMetadata)>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Convert into a [`Stream`]. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<(T, PaginationMetadata)>> {
        stream::try_unfold(self, |mut seq| async move {
            let item = seq.next().await?;
            Ok::<_, Error>(item.map(|item| (item, seq)))
        })
    }
}

impl<R, T> ResourceSequence<R, T> {
    /// The underlying page-level sequence
    pub fn pages(&self) -> &PaginatedSequence<R> {
        &self.inner
    }

    pub fn current_page(&self) -> u32 {
        self.inner.current_page()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.inner.total_pages()
    }

    pub fn total_objects(&self) -> Option<u64> {
        self.inner.total_objects()
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}

impl<R, T> std::fmt::Debug for ResourceSequence<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSequence")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
