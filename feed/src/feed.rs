//! The channel feed: one page of a channel's videos, newest first, ready for the player.

use crate::config::FeedConfig;
use crate::demo::demo_page;
use crate::error::{ApiError, FeedError, ResolveError};
use crate::normalize::{NormalizedVideo, merge};
use crate::youtube_api::{
    PagedStream, ReqwestTransport, SearchResult, Transport, Video, YouTubeClient,
};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tokio_stream::Stream;
use tracing::instrument;

/// A channel shown when the user has not picked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The channel the viewer opens with.
pub const DEFAULT_CHANNEL: ChannelInfo = ChannelInfo {
    id: "UChwgNUWPM-ksOP3BbfQHS5Q",
    name: "ジャルジャル",
    description: "お笑いコンビ「ジャルジャル」の公式チャンネル",
};

/// One page of normalized videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    videos: Vec<NormalizedVideo>,
    next_page_token: Option<String>,
    total_results: u32,
}

impl FeedPage {
    pub(crate) fn new(
        videos: Vec<NormalizedVideo>,
        next_page_token: Option<String>,
        total_results: u32,
    ) -> Self {
        Self {
            videos,
            next_page_token: next_page_token.filter(|t| !t.is_empty()),
            total_results,
        }
    }

    /// The videos on this page, in upstream search order.
    pub fn videos(&self) -> &[NormalizedVideo] {
        &self.videos
    }

    /// The token to pass back for the following page; `None` on the last page.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn is_last_page(&self) -> bool {
        self.next_page_token.is_none()
    }

    /// The result count YouTube reported for the whole listing. This is an estimate.
    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn into_parts(self) -> (Vec<NormalizedVideo>, Option<String>, u32) {
        (self.videos, self.next_page_token, self.total_results)
    }
}

/// Why demo content was served instead of the channel's videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoReason {
    /// No API key is configured. This never changes for the life of the feed.
    NoApiKey,
    /// YouTube refused the channel search (HTTP 403), typically because the daily quota is spent.
    AccessDenied,
}

/// A successfully served page, and whether it came from YouTube or from the demo set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    Live(FeedPage),
    Demo { page: FeedPage, reason: DemoReason },
}

impl FeedOutcome {
    fn demo(reason: DemoReason) -> Self {
        FeedOutcome::Demo {
            page: demo_page(),
            reason,
        }
    }

    pub fn page(&self) -> &FeedPage {
        match self {
            FeedOutcome::Live(page) | FeedOutcome::Demo { page, .. } => page,
        }
    }

    pub fn into_page(self) -> FeedPage {
        match self {
            FeedOutcome::Live(page) | FeedOutcome::Demo { page, .. } => page,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, FeedOutcome::Demo { .. })
    }

    pub fn demo_reason(&self) -> Option<DemoReason> {
        match self {
            FeedOutcome::Live(_) => None,
            FeedOutcome::Demo { reason, .. } => Some(*reason),
        }
    }
}

/// Fetches channel feeds from YouTube, falling back to demo content where that is the policy.
///
/// Each call hits the network afresh; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ChannelFeed<T = ReqwestTransport> {
    page_size: u32,
    client: YouTubeClient<T>,
}

impl ChannelFeed<ReqwestTransport> {
    pub fn new(config: &FeedConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: Transport> ChannelFeed<T> {
    pub fn with_transport(config: &FeedConfig, transport: T) -> Self {
        Self {
            page_size: config.page_size(),
            client: YouTubeClient::new(config, transport),
        }
    }

    pub fn client(&self) -> &YouTubeClient<T> {
        &self.client
    }

    /// Fetches one page of a channel's videos, newest first.
    ///
    /// 1. Without an API key, returns the demo page.
    /// 2. Otherwise searches the channel's videos. A 403 from this search returns the demo page;
    ///    any other failure is returned as [`FeedError::Fetch`].
    /// 3. Looks up duration and statistics for all returned videos in one batch. If that fails,
    ///    the page is still returned, with those fields at their defaults.
    #[instrument(skip(self))]
    pub async fn fetch_channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<FeedOutcome, FeedError> {
        if !self.client.has_api_key() {
            tracing::warn!("no YouTube API key configured, serving demo videos");
            return Ok(FeedOutcome::demo(DemoReason::NoApiKey));
        }

        match self
            .fetch_live_page(channel_id, max_results, page_token)
            .await
        {
            Ok(page) => Ok(FeedOutcome::Live(page)),
            Err(e) if e.is_access_denied() => {
                tracing::warn!(error = %e, "YouTube denied the channel search, serving demo videos");
                Ok(FeedOutcome::demo(DemoReason::AccessDenied))
            }
            Err(e) => {
                tracing::error!(error = %e, "channel search failed");
                Err(FeedError::Fetch(e))
            }
        }
    }

    /// One page straight from YouTube, with no demo fallback. Only the search can fail.
    async fn fetch_live_page(
        &self,
        channel_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<FeedPage, ApiError> {
        let search = self
            .client
            .search_channel_videos(channel_id, max_results, page_token)
            .await?;

        let details = self.fetch_details(&search.items).await;
        let videos = merge(&search.items, &details);
        tracing::debug!(
            videos = videos.len(),
            with_details = details.len(),
            "assembled feed page"
        );

        Ok(FeedPage::new(
            videos,
            search.next_page_token,
            search.page_info.total_results,
        ))
    }

    /// [`Self::fetch_channel_videos`] for the first page, at the configured page size.
    pub async fn fetch_default_page(&self, channel_id: &str) -> Result<FeedOutcome, FeedError> {
        self.fetch_channel_videos(channel_id, self.page_size, None)
            .await
    }

    /// Best-effort batch lookup of video details, keyed by video ID. Never fails.
    async fn fetch_details(&self, items: &[SearchResult]) -> HashMap<String, Video> {
        let ids: Vec<&str> = items.iter().filter_map(SearchResult::video_id).collect();
        if ids.is_empty() {
            return HashMap::new();
        }

        match self.client.list_videos(&ids).await {
            Ok(response) => response
                .items
                .into_iter()
                .filter(|video| !video.id.is_empty())
                .map(|video| (video.id.clone(), video))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch video details, using search results only");
                HashMap::new()
            }
        }
    }

    /// Yields a channel's videos across pages, following continuation tokens as it goes.
    ///
    /// The first page is fetched with [`Self::fetch_channel_videos`], so demo fallback applies
    /// to it: a demo page is yielded in full, and then the stream ends. Later pages never fall
    /// back to demo content; any failure there, 403 included, ends the stream with
    /// [`FeedError::Fetch`].
    #[instrument(skip(self))]
    pub fn stream_channel_videos(
        &self,
        channel_id: &str,
        page_size: u32,
    ) -> impl Stream<Item = Result<NormalizedVideo, FeedError>> + use<'_, T> {
        let channel_id = channel_id.to_string();
        PagedStream::new(move |page_token: Option<String>| {
            let channel_id = channel_id.clone();
            async move {
                let page = match page_token {
                    None => self
                        .fetch_channel_videos(&channel_id, page_size, None)
                        .await?
                        .into_page(),
                    Some(page_token) => self
                        .fetch_live_page(&channel_id, page_size, Some(&page_token))
                        .await
                        .map_err(FeedError::Fetch)?,
                };
                let (videos, next_page_token, _) = page.into_parts();
                Ok::<_, FeedError>((VecDeque::from(videos), next_page_token))
            }
        })
    }

    /// Looks up a channel's ID by its display name, taking YouTube's best match.
    ///
    /// There is no demo fallback here. Without an API key this fails immediately with
    /// [`ResolveError::SearchFailed`].
    #[instrument(skip(self), ret, err)]
    pub async fn resolve_channel_id(&self, display_name: &str) -> Result<String, ResolveError> {
        let response = self
            .client
            .search_channels(display_name, 1)
            .await
            .map_err(ResolveError::SearchFailed)?;

        response
            .items
            .iter()
            .find_map(SearchResult::channel_id)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::NotFound {
                name: display_name.to_string(),
            })
    }

    /// Whether YouTube accepts the configured API key.
    pub async fn validate_api_key(&self) -> bool {
        self.client.validate_api_key().await
    }
}
