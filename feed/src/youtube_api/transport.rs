//! The HTTP seam underneath [`YouTubeClient`](super::YouTubeClient).
//!
//! Every YouTube Data API call made by this crate is a plain `GET` with query parameters that
//! returns a JSON body. The [`Transport`] trait captures exactly that, so the client logic can be
//! exercised against canned responses without a network.

use http::StatusCode;
use std::future::Future;

/// Failure to obtain a successful response body from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server answered, but with a non-2xx status.
    #[error("request failed with status {status}")]
    Status {
        /// The HTTP status code returned by the server.
        status: StatusCode,
        /// The raw response body, which for Google APIs is usually a JSON error document.
        body: String,
    },
    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("{0}")]
    Request(String),
}

/// Performs `GET` requests and hands back the response body of successful calls.
pub trait Transport: Send + Sync {
    /// Issues a `GET` to `url` with the given query parameters.
    ///
    /// Returns the response body for 2xx responses and [`TransportError::Status`] otherwise.
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing HTTP client, e.g. one with custom timeouts or proxies.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<String, TransportError>> + Send {
        tracing::trace!(url, "GET");
        let request = self.client.get(url).query(query);
        async move {
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Request(e.to_string()))?;

            if !status.is_success() {
                return Err(TransportError::Status { status, body });
            }

            Ok(body)
        }
    }
}
