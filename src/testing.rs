//! Scripted transport for unit tests

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses in order and records every request it sees
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, response: HttpResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.push(Err(TransportError::new(message)));
        self
    }

    pub(crate) fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}

/// A 200 JSON page with optional `Link` and `X-Total-Count` headers
pub(crate) fn json_page(body: &str, link: Option<&str>, total: Option<&str>) -> HttpResponse {
    let mut response = HttpResponse::new(200).body(body);
    if let Some(link) = link {
        response = response.header("Link", link);
    }
    if let Some(total) = total {
        response = response.header("X-Total-Count", total);
    }
    response
}
