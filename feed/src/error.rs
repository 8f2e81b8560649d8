//! Error types surfaced by the feed.
//!
//! Only failures without a defined fallback ever reach callers. A missing API key and a
//! quota/permission denial on the channel search turn into demo content instead (see
//! [`FeedOutcome`](crate::FeedOutcome)), and a failed detail lookup only degrades fields to
//! their defaults.

use http::StatusCode;

/// A single YouTube Data API call failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// YouTube answered with a non-2xx status.
    ///
    /// `message` comes from the error document YouTube sends along when there is one.
    #[error("YouTube API {endpoint} request failed with status {status}: {message}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        message: String,
    },
    /// The request did not produce a response at all.
    #[error("send request to YouTube API {endpoint}: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    /// The response body was not the JSON we expected.
    #[error("parse YouTube API {endpoint} response as JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// No API key is configured, so no request was made.
    #[error("no YouTube API key configured")]
    MissingApiKey,
}

impl ApiError {
    /// Whether YouTube refused the request for permission or quota reasons (HTTP 403).
    pub fn is_access_denied(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::FORBIDDEN)
    }

    /// The most specific human-readable description of what went wrong.
    ///
    /// This is the upstream error message when YouTube provided one, and the transport's own
    /// message otherwise.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Transport { message, .. } => {
                message.clone()
            }
            ApiError::Decode { source, .. } => source.to_string(),
            ApiError::MissingApiKey => self.to_string(),
        }
    }
}

/// Fetching a page of channel videos failed in a way that has no demo fallback.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to fetch videos: {}", .0.message())]
    Fetch(#[source] ApiError),
}

impl FeedError {
    /// The upstream failure behind this error.
    pub fn api_error(&self) -> &ApiError {
        match self {
            FeedError::Fetch(e) => e,
        }
    }
}

/// Looking up a channel ID by display name failed.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The search succeeded but matched no channel.
    #[error("no channel found matching {name:?}")]
    NotFound { name: String },
    /// The search itself failed.
    #[error("channel search failed")]
    SearchFailed(#[source] ApiError),
}
