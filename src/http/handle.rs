//! Response handling
//!
//! Maps raw [`HttpResponse`]s onto the error taxonomy and decodes JSON
//! bodies. Used by the page fetcher and by single-resource calls alike.

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Classify a non-2xx status, or `None` if the response succeeded
///
/// 404 is reported as [`Error::ResourceNotFound`]; any other failure status
/// carries the body text verbatim.
pub fn check_status(response: &HttpResponse) -> Option<Error> {
    if response.is_success() {
        return None;
    }

    if response.status == 404 {
        Some(Error::ResourceNotFound)
    } else {
        Some(Error::ServerMessage(response.body_text().unwrap_or_default()))
    }
}

/// Check the status and decode the body as JSON
pub fn handle_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    if let Some(err) = check_status(response) {
        return Err(err);
    }

    let body = response.body.as_deref().ok_or(Error::EmptyResponseBody)?;

    serde_json::from_slice(body)
        .map_err(|e| Error::decode(e.to_string(), String::from_utf8_lossy(body)))
}

/// Send a request and decode the JSON response
pub async fn send_and_handle<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: HttpRequest,
) -> Result<T> {
    let response = transport
        .send(request)
        .await
        .map_err(|e| Error::transport(e.message))?;
    handle_response(&response)
}

/// Send a request and only check the status, discarding the body
pub async fn send_and_check(transport: &dyn Transport, request: HttpRequest) -> Result<()> {
    let response = transport
        .send(request)
        .await
        .map_err(|e| Error::transport(e.message))?;
    match check_status(&response) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
