//! Core YouTube API client functionality.

use crate::config::FeedConfig;
use crate::error::ApiError;
use crate::youtube_api::search::SearchListResponse;
use crate::youtube_api::transport::{Transport, TransportError};
use crate::youtube_api::types::ErrorResponse;
use crate::youtube_api::videos::VideoListResponse;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Client for the read-only, key-authenticated part of the YouTube Data API v3.
///
/// Every method is a single `GET` request. There is no caching, retrying or rate limiting; a
/// failed call is reported to the caller as an [`ApiError`] and it is up to the caller to decide
/// whether that failure has a fallback.
#[derive(Clone)]
pub struct YouTubeClient<T> {
    api_key: Option<String>,
    base_url: String,
    transport: T,
}

impl<T: std::fmt::Debug> std::fmt::Debug for YouTubeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // never print the key itself
        f.debug_struct("YouTubeClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .finish()
    }
}

impl<T: Transport> YouTubeClient<T> {
    pub fn new(config: &FeedConfig, transport: T) -> Self {
        Self {
            api_key: config.api_key().map(str::to_string),
            base_url: config.api_base_url().to_string(),
            transport,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issues a `GET` to `endpoint` with the API key appended and decodes the JSON response.
    ///
    /// Non-2xx responses become [`ApiError::Status`], carrying the message from YouTube's error
    /// document when the body is one.
    #[instrument(skip(self, query), level = tracing::Level::TRACE)]
    async fn get_json<R: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params = query.to_vec();
        params.push(("key", api_key));

        let body = match self.transport.get(&url, &params).await {
            Ok(body) => body,
            Err(TransportError::Status { status, body }) => {
                let message = match serde_json::from_str::<ErrorResponse>(&body) {
                    Ok(ErrorResponse { error }) => {
                        tracing::trace!(endpoint, code = ?error.code, "YouTube error document");
                        error.message
                    }
                    Err(_) => format!("request failed with status code {}", status.as_u16()),
                };
                return Err(ApiError::Status {
                    endpoint,
                    status,
                    message,
                });
            }
            Err(TransportError::Request(message)) => {
                return Err(ApiError::Transport { endpoint, message });
            }
        };

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { endpoint, source })
    }

    /// Lists the videos of a channel, newest first.
    ///
    /// Uses `search.list` with `type=video&order=date`. `page_token` continues a previous listing.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub async fn search_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, ApiError> {
        let max_results = max_results.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(page_token) = page_token.filter(|t| !t.is_empty()) {
            query.push(("pageToken", page_token));
        }

        let response: SearchListResponse = self.get_json("search", &query).await?;
        tracing::debug!(
            channel_id,
            returned_items = response.items.len(),
            total_results = response.page_info.total_results,
            has_next_page = response.next_page_token.is_some(),
            "searched channel videos"
        );
        Ok(response)
    }

    /// Fetches duration and statistics for a batch of videos in one call.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    pub async fn list_videos(&self, video_ids: &[&str]) -> Result<VideoListResponse, ApiError> {
        let ids = video_ids.join(",");
        let query = [
            ("part", "contentDetails,statistics,snippet"),
            ("id", ids.as_str()),
        ];

        let response: VideoListResponse = self.get_json("videos", &query).await?;
        tracing::debug!(
            requested = video_ids.len(),
            returned_items = response.items.len(),
            "fetched video details"
        );
        Ok(response)
    }

    /// Searches for channels by free text, e.g. a channel's display name.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, ApiError> {
        let max_results = max_results.to_string();
        let params = [
            ("part", "snippet"),
            ("q", query),
            ("type", "channel"),
            ("maxResults", max_results.as_str()),
        ];
        self.get_json("search", &params).await
    }

    /// Checks that the configured API key is accepted by YouTube.
    ///
    /// Makes a minimal one-result search. Any failure, including a missing key, yields `false`.
    #[instrument(skip(self), ret)]
    pub async fn validate_api_key(&self) -> bool {
        if !self.has_api_key() {
            return false;
        }

        let params = [
            ("part", "snippet"),
            ("q", "test"),
            ("type", "video"),
            ("maxResults", "1"),
        ];
        match self.get_json::<SearchListResponse>("search", &params).await {
            Ok(_) => {
                tracing::debug!("YouTube API key validation successful");
                true
            }
            Err(e) => {
                tracing::warn!("YouTube API key validation failed: {}", e);
                false
            }
        }
    }
}
