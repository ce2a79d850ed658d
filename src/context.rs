//! API context
//!
//! An [`ApiContext`] bundles what every request needs: the API root URL,
//! credentials, a shared [`Transport`] and the default headers. It is cheap
//! to clone; resources keep a copy so they can issue follow-up requests.

use crate::auth::AuthConfig;
use crate::endpoint::UrlExt;
use crate::error::{Error, Result};
use crate::http::{send_and_check, send_and_handle, Headers, HttpRequest, Transport};
use crate::pagination::PaginatedSequence;
use crate::types::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

/// Page size requested from collection endpoints unless overridden
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Shared request context
#[derive(Clone)]
pub struct ApiContext {
    base_url: Url,
    auth: Arc<AuthConfig>,
    transport: Arc<dyn Transport>,
    default_headers: Headers,
    per_page: u32,
}

impl ApiContext {
    /// Create a context rooted at `base_url`
    /// (e.g. `https://your-org.crowdfiber.com/api/v2/`)
    pub fn new(base_url: Url, auth: AuthConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            auth: Arc::new(auth),
            transport,
            default_headers: Headers::accept_json(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Replace the headers sent with every request
    #[must_use]
    pub fn with_default_headers(mut self, headers: Headers) -> Self {
        self.default_headers = headers;
        self
    }

    /// Set the page size for collection endpoints
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Base URL with path segments appended
    pub fn endpoint<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        self.base_url.join_segments(segments)
    }

    /// Collection URL: path segments plus the `per_page` parameter
    pub fn collection<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = self.endpoint(segments)?;
        url.set_query_param("per_page", &self.per_page.to_string());
        Ok(url)
    }

    /// Default headers with auth merged on top
    pub fn request_headers(&self) -> Headers {
        self.default_headers.merged(&self.auth.headers())
    }

    /// Lazily paginated sequence over the collection at `url`
    pub fn sequence<E: DeserializeOwned>(&self, url: Url) -> PaginatedSequence<E> {
        PaginatedSequence::new(url, Arc::clone(&self.auth), Arc::clone(&self.transport))
            .with_default_headers(self.default_headers.clone())
    }

    /// GET `url` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = HttpRequest::get(url).headers(self.request_headers());
        send_and_handle(self.transport(), request).await
    }

    /// Send `body` as JSON and decode the JSON response
    pub async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.json_request(method, url, body)?;
        send_and_handle(self.transport(), request).await
    }

    /// Send `body` as JSON and only check the response status
    pub async fn send_json_unit<B>(&self, method: Method, url: Url, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let request = self.json_request(method, url, body)?;
        send_and_check(self.transport(), request).await
    }

    fn json_request<B>(&self, method: Method, url: Url, body: &B) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| Error::encode(e.to_string()))?;
        let headers = self
            .default_headers
            .merged(&Headers::new().with("Content-Type", "application/json"))
            .merged(&self.auth.headers());
        Ok(HttpRequest::new(method, url).headers(headers).body(bytes))
    }
}

impl std::fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiContext")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &!self.auth.is_none())
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}
