//! URL helpers
//!
//! Endpoint URLs are built from the API root by appending path segments and
//! setting query parameters. Setting a parameter replaces every previous
//! occurrence of it, so re-stamping `page` never produces duplicates.

use crate::error::{Error, Result};
use url::Url;

/// Path and query manipulation on [`Url`]
pub trait UrlExt: Sized {
    /// Return a copy with `segments` appended to the path
    fn join_segments<S: AsRef<str>>(&self, segments: &[S]) -> Result<Self>;

    /// Set a query parameter, replacing any existing values for `key`
    fn set_query_param(&mut self, key: &str, value: &str);

    /// First value of a query parameter
    fn query_param(&self, key: &str) -> Option<String>;
}

impl UrlExt for Url {
    fn join_segments<S: AsRef<str>>(&self, segments: &[S]) -> Result<Self> {
        let mut url = self.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::other(format!("URL cannot be a base: {self}")))?;
            // "https://host/api/v2/" ends in an empty segment
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    fn set_query_param(&mut self, key: &str, value: &str) {
        let kept: Vec<(String, String)> = self
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = self.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(key, value);
    }

    fn query_param(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}
