//! Merging search results with video details into the view model the player consumes.

use crate::duration::{ZERO_DURATION, format_duration};
use crate::youtube_api::{SearchResult, Video};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Base URL of YouTube's embeddable player.
pub const PLAYER_BASE_URL: &str = "https://www.youtube.com/embed";

/// Player flags appended to every embed URL: JS API on, autoplay muted, controls visible,
/// related videos and title overlay off.
pub const PLAYER_PARAMS: &str = "enablejsapi=1&autoplay=1&mute=1&controls=1&rel=0&showinfo=0";

pub const UNKNOWN_TITLE: &str = "title unknown";
pub const UNKNOWN_CHANNEL: &str = "channel unknown";

/// The embeddable, autoplaying player URL for a video.
pub fn embed_url(video_id: &str) -> String {
    format!("{PLAYER_BASE_URL}/{video_id}?{PLAYER_PARAMS}")
}

/// The thumbnail YouTube serves for every video, used when a search result lists none.
pub fn default_thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")
}

/// A video as shown in the swipe feed.
///
/// Every field is populated: whatever YouTube left out has been replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedVideo {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(rename = "thumbnail")]
    pub(crate) thumbnail_url: String,
    pub(crate) published_at: String,
    pub(crate) channel_title: String,
    /// ISO 8601, e.g. `PT4M13S`
    pub(crate) duration: String,
    pub(crate) view_count: String,
    pub(crate) like_count: String,
    pub(crate) embed_url: String,
}

impl NormalizedVideo {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    /// The publish time as YouTube reported it (RFC 3339), or empty if it did not.
    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    /// The publish time, if it parses.
    pub fn published_timestamp(&self) -> Option<jiff::Timestamp> {
        self.published_at.parse().ok()
    }

    pub fn channel_title(&self) -> &str {
        &self.channel_title
    }

    /// The raw ISO 8601 duration; `PT0S` when unknown.
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// The duration as a player clock, e.g. `4:13`.
    pub fn formatted_duration(&self) -> String {
        format_duration(Some(&self.duration))
    }

    pub fn view_count(&self) -> &str {
        &self.view_count
    }

    pub fn like_count(&self) -> &str {
        &self.like_count
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Turns one search result (plus its details, if any were fetched) into a [`NormalizedVideo`].
///
/// Returns `None` only for results that do not reference a video. Missing or blank fields fall
/// back to defaults:
///
/// | field     | fallback                                                  |
/// |-----------|-----------------------------------------------------------|
/// | title     | `"title unknown"`                                         |
/// | thumbnail | high, then medium, then default resolution, then derived  |
/// | channel   | `"channel unknown"`                                       |
/// | duration  | `"PT0S"`                                                  |
/// | counts    | `"0"`                                                     |
pub fn normalize(item: &SearchResult, details: Option<&Video>) -> Option<NormalizedVideo> {
    let id = item.video_id()?;
    let snippet = &item.snippet;

    Some(NormalizedVideo {
        id: id.to_string(),
        title: non_blank(snippet.title.as_deref())
            .unwrap_or(UNKNOWN_TITLE)
            .to_string(),
        description: snippet.description.clone().unwrap_or_default(),
        thumbnail_url: snippet
            .thumbnails
            .best_url()
            .map(str::to_string)
            .unwrap_or_else(|| default_thumbnail_url(id)),
        published_at: snippet.published_at.clone().unwrap_or_default(),
        channel_title: non_blank(snippet.channel_title.as_deref())
            .unwrap_or(UNKNOWN_CHANNEL)
            .to_string(),
        duration: non_blank(details.and_then(Video::duration))
            .unwrap_or(ZERO_DURATION)
            .to_string(),
        view_count: non_blank(details.and_then(Video::view_count))
            .unwrap_or("0")
            .to_string(),
        like_count: non_blank(details.and_then(Video::like_count))
            .unwrap_or("0")
            .to_string(),
        embed_url: embed_url(id),
    })
}

/// Normalizes `items` in order, pairing each with its entry in `details` (keyed by video ID).
///
/// `details` may be empty, in which case every video gets default duration and counts. Results
/// that do not reference a video are dropped.
pub fn merge(items: &[SearchResult], details: &HashMap<String, Video>) -> Vec<NormalizedVideo> {
    items
        .iter()
        .filter_map(|item| {
            let video = normalize(item, item.video_id().and_then(|id| details.get(id)));
            if video.is_none() {
                tracing::debug!(kind = ?item.id.kind, "skipping search result without a video id");
            }
            video
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube_api::{SearchListResponse, VideoListResponse};
    use pretty_assertions::assert_eq;

    fn search_item(json: &str) -> SearchResult {
        serde_json::from_str(json).unwrap()
    }

    fn full_item() -> SearchResult {
        search_item(
            r#"{
                "kind": "youtube#searchResult",
                "id": {"kind": "youtube#video", "videoId": "abc123"},
                "snippet": {
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "channelId": "UC1",
                    "title": "A short",
                    "description": "desc",
                    "thumbnails": {
                        "default": {"url": "https://i.ytimg.com/vi/abc123/default.jpg", "width": 120, "height": 90},
                        "medium": {"url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg"},
                        "high": {"url": "https://i.ytimg.com/vi/abc123/hqdefault_live.jpg"}
                    },
                    "channelTitle": "Some Channel"
                }
            }"#,
        )
    }

    fn details() -> Video {
        serde_json::from_str(
            r#"{
                "id": "abc123",
                "contentDetails": {"duration": "PT4M13S"},
                "statistics": {"viewCount": "1024", "likeCount": "42", "commentCount": "3"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn normalize_with_details() {
        let video = normalize(&full_item(), Some(&details())).unwrap();
        assert_eq!(
            video,
            NormalizedVideo {
                id: "abc123".into(),
                title: "A short".into(),
                description: "desc".into(),
                thumbnail_url: "https://i.ytimg.com/vi/abc123/hqdefault_live.jpg".into(),
                published_at: "2024-05-01T12:00:00Z".into(),
                channel_title: "Some Channel".into(),
                duration: "PT4M13S".into(),
                view_count: "1024".into(),
                like_count: "42".into(),
                embed_url: "https://www.youtube.com/embed/abc123?enablejsapi=1&autoplay=1&mute=1&controls=1&rel=0&showinfo=0".into(),
            }
        );
        assert_eq!(video.formatted_duration(), "4:13");
        assert_eq!(
            video.published_timestamp(),
            Some("2024-05-01T12:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn normalize_without_details() {
        let video = normalize(&full_item(), None).unwrap();
        assert_eq!(video.duration(), ZERO_DURATION);
        assert_eq!(video.formatted_duration(), "0:00");
        assert_eq!(video.view_count(), "0");
        assert_eq!(video.like_count(), "0");
    }

    #[test]
    fn bare_item_gets_defaults() {
        let video = normalize(&search_item(r#"{"id": {"videoId": "xyz"}}"#), None).unwrap();
        assert_eq!(video.title(), UNKNOWN_TITLE);
        assert_eq!(video.description(), "");
        assert_eq!(video.thumbnail_url(), "https://i.ytimg.com/vi/xyz/hqdefault.jpg");
        assert_eq!(video.published_at(), "");
        assert_eq!(video.published_timestamp(), None);
        assert_eq!(video.channel_title(), UNKNOWN_CHANNEL);
        assert_eq!(video.embed_url(), embed_url("xyz"));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let item = search_item(
            r#"{"id": {"videoId": "xyz"}, "snippet": {"title": "", "channelTitle": " "}}"#,
        );
        let details: Video = serde_json::from_str(
            r#"{"id": "xyz", "contentDetails": {"duration": ""}, "statistics": {"viewCount": ""}}"#,
        )
        .unwrap();

        let video = normalize(&item, Some(&details)).unwrap();
        assert_eq!(video.title(), UNKNOWN_TITLE);
        assert_eq!(video.channel_title(), UNKNOWN_CHANNEL);
        assert_eq!(video.duration(), ZERO_DURATION);
        assert_eq!(video.view_count(), "0");
    }

    #[test]
    fn thumbnail_fallback_chain() {
        let medium = search_item(
            r#"{"id": {"videoId": "v"}, "snippet": {"thumbnails": {
                "default": {"url": "d.jpg"}, "medium": {"url": "m.jpg"}, "high": {"url": ""}
            }}}"#,
        );
        assert_eq!(normalize(&medium, None).unwrap().thumbnail_url(), "m.jpg");

        let default = search_item(
            r#"{"id": {"videoId": "v"}, "snippet": {"thumbnails": {"default": {"url": "d.jpg"}}}}"#,
        );
        assert_eq!(normalize(&default, None).unwrap().thumbnail_url(), "d.jpg");
    }

    #[test]
    fn items_without_video_id_are_not_videos() {
        assert_eq!(normalize(&search_item(r#"{"id": {"channelId": "UC1"}}"#), None), None);
        assert_eq!(normalize(&search_item(r#"{"id": {"videoId": ""}}"#), None), None);
        assert_eq!(normalize(&search_item("{}"), None), None);
    }

    #[test]
    fn normalize_is_pure() {
        let item = full_item();
        let details = details();
        assert_eq!(
            normalize(&item, Some(&details)),
            normalize(&item, Some(&details))
        );
    }

    #[test]
    fn embed_url_keeps_id_and_flags() {
        for id in ["jNQXAC9IVRw", "a-b_c", "x"] {
            let url = embed_url(id);
            assert!(url.contains(&format!("/{id}?")), "{url}");
            assert!(url.ends_with(PLAYER_PARAMS), "{url}");
        }
    }

    #[test]
    fn merge_keeps_search_order_and_pairs_by_id() {
        let search: SearchListResponse = serde_json::from_str(
            r#"{"items": [
                {"id": {"videoId": "new"}, "snippet": {"title": "newest"}},
                {"id": {"channelId": "UC1"}},
                {"id": {"videoId": "old"}, "snippet": {"title": "oldest"}}
            ]}"#,
        )
        .unwrap();
        let videos: VideoListResponse = serde_json::from_str(
            r#"{"items": [
                {"id": "old", "contentDetails": {"duration": "PT1H"}},
                {"id": "new", "statistics": {"likeCount": "7"}}
            ]}"#,
        )
        .unwrap();
        let details: HashMap<_, _> = videos
            .items
            .into_iter()
            .map(|v| (v.id.clone(), v))
            .collect();

        let merged = merge(&search.items, &details);
        let ids: Vec<_> = merged.iter().map(NormalizedVideo::id).collect();
        assert_eq!(ids, ["new", "old"]);
        assert_eq!(merged[0].like_count(), "7");
        assert_eq!(merged[0].duration(), ZERO_DURATION);
        assert_eq!(merged[1].duration(), "PT1H");
        assert_eq!(merged[1].like_count(), "0");
    }

    #[test]
    fn merge_with_no_details() {
        let items = [full_item(), full_item()];
        let merged = merge(&items, &HashMap::new());
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|v| v.duration() == ZERO_DURATION));
    }
}
