//! YouTube Videos API types.

use serde::{Deserialize, Serialize};

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// The videos that matched the requested IDs. Unknown IDs are silently left out.
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A `video` resource represents a YouTube video.
///
/// Only the parts requested by this crate (`contentDetails`, `statistics`) are modelled.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video. Empty if YouTube left it out.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "contentDetails", default)]
    pub content_details: Option<VideoContentDetails>,
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
}

impl Video {
    /// The ISO 8601 duration of the video, e.g. `PT4M13S`.
    pub fn duration(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|details| details.duration.as_deref())
    }

    pub fn view_count(&self) -> Option<&str> {
        self.statistics
            .as_ref()
            .and_then(|stats| stats.view_count.as_deref())
    }

    pub fn like_count(&self) -> Option<&str> {
        self.statistics
            .as_ref()
            .and_then(|stats| stats.like_count.as_deref())
    }
}

/// Information about the video content.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration (`PT#H#M#S`).
    #[serde(default)]
    pub duration: Option<String>,
}

/// Statistics about the video.
///
/// Counts are transmitted as decimal strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount", default)]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount", default)]
    pub like_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount", default)]
    pub comment_count: Option<String>,
}
