//! An in-memory [`Transport`] for exercising the feed without talking to YouTube.
//!
//! Responses are registered per endpoint (the last path segment of the request URL, e.g.
//! `search` or `videos`) and served in order; the last registered response for an endpoint
//! keeps being served once the others are used up. Every request is recorded.

use crate::youtube_api::transport::{Transport, TransportError};
use http::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl MockRequest {
    /// The value of the first query parameter called `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The endpoint this request was sent to.
    pub fn endpoint(&self) -> &str {
        endpoint_of(&self.url)
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, VecDeque<Result<String, TransportError>>>,
    requests: Vec<MockRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

fn endpoint_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, endpoint: &str, response: Result<String, TransportError>) -> Self {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .responses
            .entry(endpoint.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Answer the next request to `endpoint` with a `200 OK` carrying `body`.
    pub fn respond(self, endpoint: &str, body: impl Into<String>) -> Self {
        self.push(endpoint, Ok(body.into()))
    }

    /// Answer the next request to `endpoint` with an error `status` carrying `body`.
    pub fn fail(self, endpoint: &str, status: StatusCode, body: impl Into<String>) -> Self {
        self.push(
            endpoint,
            Err(TransportError::Status {
                status,
                body: body.into(),
            }),
        )
    }

    /// Fail the next request to `endpoint` before any response arrives.
    pub fn disconnect(self, endpoint: &str, message: impl Into<String>) -> Self {
        self.push(endpoint, Err(TransportError::Request(message.into())))
    }

    /// All requests made so far, in order.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .clone()
    }

    fn next_response(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.requests.push(MockRequest {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        let endpoint = endpoint_of(url);
        let Some(queue) = state.responses.get_mut(endpoint) else {
            return Err(TransportError::Request(format!(
                "no mock response registered for {endpoint}"
            )));
        };
        if queue.len() > 1
            && let Some(response) = queue.pop_front()
        {
            return response;
        }
        queue
            .front()
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Request("mock exhausted".to_string())))
    }
}

impl Transport for MockTransport {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, TransportError>> + Send {
        let response = self.next_response(url, query);
        async move { response }
    }
}
