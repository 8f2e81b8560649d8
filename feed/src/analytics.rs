//! Viewer analytics events.
//!
//! Events are a name plus a flat parameter map, the shape tag-based analytics services expect.
//! Where they end up is decided by an [`AnalyticsSink`]; nothing else in this crate depends on
//! one being present, and tracking without a sink only logs.

use crate::error::FeedError;
use crate::feed::FeedOutcome;
use crate::routes::APP_NAME;
use serde_json::{Map, Value, json};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
}

impl SwipeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Up => "up",
            SwipeDirection::Down => "down",
        }
    }
}

/// Where a batch of videos came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiType {
    YouTubeApi,
    DemoData,
}

impl ApiType {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiType::YouTubeApi => "youtube_api",
            ApiType::DemoData => "demo_data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    VideoPlay {
        video_id: String,
        video_title: String,
        channel_name: String,
    },
    VideoPause {
        video_id: String,
        watch_duration_secs: f64,
    },
    VideoSwipe {
        direction: SwipeDirection,
        from_video: String,
        to_video: String,
    },
    VolumeChange {
        muted: bool,
        video_id: String,
    },
    Error {
        error_type: String,
        error_message: String,
        video_id: Option<String>,
    },
    ApiUsage {
        api_type: ApiType,
        success: bool,
        video_count: usize,
    },
    SessionStart {
        page_title: String,
        page_location: String,
    },
    PageView {
        page_title: String,
        page_location: String,
    },
}

impl AnalyticsEvent {
    /// The `api_usage` event describing the result of a feed fetch.
    ///
    /// Demo pages count as successful `demo_data` usage; failures as unsuccessful `youtube_api`
    /// usage with no videos.
    pub fn api_usage(result: &Result<FeedOutcome, FeedError>) -> Self {
        let (api_type, success, video_count) = match result {
            Ok(outcome) => {
                let api_type = if outcome.is_demo() {
                    ApiType::DemoData
                } else {
                    ApiType::YouTubeApi
                };
                (api_type, true, outcome.page().videos().len())
            }
            Err(_) => (ApiType::YouTubeApi, false, 0),
        };
        AnalyticsEvent::ApiUsage {
            api_type,
            success,
            video_count,
        }
    }

    /// The event name as sent to the analytics service.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::VideoPlay { .. } => "video_play",
            AnalyticsEvent::VideoPause { .. } => "video_pause",
            AnalyticsEvent::VideoSwipe { .. } => "video_swipe",
            AnalyticsEvent::VolumeChange { .. } => "volume_change",
            AnalyticsEvent::Error { .. } => "error",
            AnalyticsEvent::ApiUsage { .. } => "api_usage",
            AnalyticsEvent::SessionStart { .. } => "session_start",
            AnalyticsEvent::PageView { .. } => "page_view",
        }
    }

    /// The event's own parameters, without the common ones [`Analytics::track`] adds.
    pub fn params(&self) -> Map<String, Value> {
        let params = match self {
            AnalyticsEvent::VideoPlay {
                video_id,
                video_title,
                channel_name,
            } => json!({
                "event_category": "video",
                "event_label": video_id,
                "video_title": video_title,
                "channel_name": channel_name,
                "content_type": "youtube_video",
            }),
            AnalyticsEvent::VideoPause {
                video_id,
                watch_duration_secs,
            } => json!({
                "event_category": "video",
                "event_label": video_id,
                "watch_duration": watch_duration_secs,
                "content_type": "youtube_video",
            }),
            AnalyticsEvent::VideoSwipe {
                direction,
                from_video,
                to_video,
            } => json!({
                "event_category": "navigation",
                "swipe_direction": direction.as_str(),
                "from_video": from_video,
                "to_video": to_video,
            }),
            AnalyticsEvent::VolumeChange { muted, video_id } => {
                let action = if *muted { "mute" } else { "unmute" };
                json!({
                    "event_category": "video_control",
                    "event_label": video_id,
                    "action": action,
                })
            }
            AnalyticsEvent::Error {
                error_type,
                error_message,
                video_id,
            } => json!({
                "event_category": "error",
                "error_type": error_type,
                "error_message": error_message,
                "video_id": video_id,
            }),
            AnalyticsEvent::ApiUsage {
                api_type,
                success,
                video_count,
            } => json!({
                "event_category": "api",
                "api_type": api_type.as_str(),
                "success": success,
                "video_count": video_count,
            }),
            AnalyticsEvent::SessionStart {
                page_title,
                page_location,
            } => json!({
                "event_category": "engagement",
                "page_title": page_title,
                "page_location": page_location,
            }),
            AnalyticsEvent::PageView {
                page_title,
                page_location,
            } => json!({
                "page_title": page_title,
                "page_location": page_location,
            }),
        };

        match params {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// Receives tracked events.
pub trait AnalyticsSink: Send + Sync {
    fn send(&self, name: &str, params: &Map<String, Value>);
}

/// Writes every event to the `tracing` log at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&self, name: &str, params: &Map<String, Value>) {
        let params = Value::Object(params.clone());
        tracing::info!(
            target: "analytics",
            event = name,
            params = %params,
            "analytics event"
        );
    }
}

/// Stamps events with the app name and time and forwards them to the sink, if there is one.
#[derive(Clone)]
pub struct Analytics {
    app_name: String,
    sink: Option<Arc<dyn AnalyticsSink>>,
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("app_name", &self.app_name)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Analytics {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            sink: Some(sink),
        }
    }

    /// Analytics without a sink: events are logged and dropped.
    pub fn disabled() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            sink: None,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn track(&self, event: &AnalyticsEvent) {
        let mut params = event.params();
        tracing::debug!(event = event.name(), "tracking analytics event");

        let Some(sink) = &self.sink else {
            tracing::warn!(event = event.name(), "no analytics sink, event not sent");
            return;
        };

        params.insert("app_name".to_string(), Value::from(self.app_name.as_str()));
        params.insert(
            "timestamp".to_string(),
            Value::from(jiff::Timestamp::now().to_string()),
        );
        sink.send(event.name(), &params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_page;
    use crate::error::ApiError;
    use crate::feed::DemoReason;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<(String, Map<String, Value>)>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn send(&self, name: &str, params: &Map<String, Value>) {
            self.events
                .lock()
                .unwrap()
                .push((name.to_string(), params.clone()));
        }
    }

    #[test]
    fn video_play_params() {
        let event = AnalyticsEvent::VideoPlay {
            video_id: "jNQXAC9IVRw".into(),
            video_title: "Me at the zoo".into(),
            channel_name: "jawed".into(),
        };
        assert_eq!(event.name(), "video_play");
        assert_eq!(
            Value::Object(event.params()),
            json!({
                "event_category": "video",
                "event_label": "jNQXAC9IVRw",
                "video_title": "Me at the zoo",
                "channel_name": "jawed",
                "content_type": "youtube_video",
            })
        );
    }

    #[test]
    fn volume_and_swipe_params() {
        let volume = AnalyticsEvent::VolumeChange {
            muted: false,
            video_id: "v".into(),
        };
        assert_eq!(volume.params()["action"], "unmute");

        let swipe = AnalyticsEvent::VideoSwipe {
            direction: SwipeDirection::Up,
            from_video: "a".into(),
            to_video: "b".into(),
        };
        assert_eq!(swipe.name(), "video_swipe");
        assert_eq!(swipe.params()["swipe_direction"], "up");
        assert_eq!(swipe.params()["event_category"], "navigation");
    }

    #[test]
    fn error_without_video_is_null() {
        let event = AnalyticsEvent::Error {
            error_type: "api".into(),
            error_message: "boom".into(),
            video_id: None,
        };
        assert_eq!(event.params()["video_id"], Value::Null);
    }

    #[test]
    fn api_usage_from_feed_results() {
        let demo = Ok(FeedOutcome::Demo {
            page: demo_page(),
            reason: DemoReason::NoApiKey,
        });
        assert_eq!(
            AnalyticsEvent::api_usage(&demo),
            AnalyticsEvent::ApiUsage {
                api_type: ApiType::DemoData,
                success: true,
                video_count: 3,
            }
        );

        let live = Ok(FeedOutcome::Live(demo_page()));
        assert_eq!(
            AnalyticsEvent::api_usage(&live).params()["api_type"],
            "youtube_api"
        );

        let failed = Err(FeedError::Fetch(ApiError::MissingApiKey));
        assert_eq!(
            AnalyticsEvent::api_usage(&failed),
            AnalyticsEvent::ApiUsage {
                api_type: ApiType::YouTubeApi,
                success: false,
                video_count: 0,
            }
        );
    }

    #[test]
    fn track_adds_common_params() {
        let sink = Arc::new(RecordingSink::default());
        let analytics = Analytics::new(sink.clone()).with_app_name("test app");

        analytics.track(&AnalyticsEvent::SessionStart {
            page_title: "Home - YouTube TikTok Viewer".into(),
            page_location: "http://localhost:3000/".into(),
        });

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let (name, params) = &events[0];
        assert_eq!(name, "session_start");
        assert_eq!(params["app_name"], "test app");
        assert_eq!(params["event_category"], "engagement");
        let timestamp = params["timestamp"].as_str().unwrap();
        assert!(timestamp.parse::<jiff::Timestamp>().is_ok(), "{timestamp}");
    }

    #[test]
    fn track_without_sink_does_not_fail() {
        Analytics::disabled().track(&AnalyticsEvent::PageView {
            page_title: APP_NAME.into(),
            page_location: "/".into(),
        });
    }

    #[test]
    fn tracing_sink_logs_every_event() {
        let analytics = Analytics::new(Arc::new(TracingSink));
        analytics.track(&AnalyticsEvent::Error {
            error_type: "api_error".into(),
            error_message: "quota exceeded".into(),
            video_id: Some("jNQXAC9IVRw".into()),
        });
        TracingSink.send("video_pause", &Map::new());
    }
}
