//! YouTube Search API types.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchListResponse {
    /// The search results, in the order requested (`order=date` gives newest first).
    #[serde(default)]
    pub items: Vec<SearchResult>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A search result points at a video, channel, or playlist matching the search query.
///
/// Everything except the identifier is optional here; YouTube drops fields freely (deleted
/// videos, private channels, partial responses) and decoding must not fail because of it.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: SearchResultId,
    #[serde(default)]
    pub snippet: SearchSnippet,
}

impl SearchResult {
    /// The video ID of this result, if it is a non-empty video reference.
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The channel ID of this result, if it is a non-empty channel reference.
    pub fn channel_id(&self) -> Option<&str> {
        self.id.channel_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Identifies the resource that matched the search request.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchResultId {
    /// The type of the API resource, e.g. `youtube#video`.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
    #[serde(rename = "channelId", default)]
    pub channel_id: Option<String>,
}

/// Basic details about a search result.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchSnippet {
    /// The creation date and time of the resource, in ISO 8601 format.
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(rename = "channelId", default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: Option<String>,
}

/// The thumbnail images associated with a search result, keyed by resolution.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// The URL of the highest resolution thumbnail that has one.
    pub fn best_url(&self) -> Option<&str> {
        [&self.high, &self.medium, &self.default]
            .into_iter()
            .flatten()
            .filter_map(|thumbnail| thumbnail.url.as_deref())
            .find(|url| !url.is_empty())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}
