//! A channel's YouTube videos as a swipeable short-form feed.
//!
//! [`ChannelFeed`] fetches one page of a channel's videos, newest first, and normalizes them into
//! [`NormalizedVideo`]s ready for an embedded player. Without an API key, or when YouTube denies
//! the channel search, it serves a fixed [demo page](demo_page) instead of failing.
//!
//! ```no_run
//! # async fn run() -> Result<(), youtube_shorts_feed::FeedError> {
//! use youtube_shorts_feed::{ChannelFeed, DEFAULT_CHANNEL, FeedConfig};
//!
//! let config = FeedConfig::builder().api_key("AIza...").build().unwrap();
//! let feed = ChannelFeed::new(&config);
//! let outcome = feed.fetch_default_page(DEFAULT_CHANNEL.id).await?;
//! for video in outcome.page().videos() {
//!     println!("{} ({})", video.title(), video.formatted_duration());
//! }
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod config;
pub mod demo;
pub mod duration;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod routes;
pub mod youtube_api;

pub use analytics::{Analytics, AnalyticsEvent, AnalyticsSink, ApiType, TracingSink};
pub use config::FeedConfig;
pub use demo::demo_page;
pub use duration::format_duration;
pub use error::{ApiError, FeedError, ResolveError};
pub use feed::{ChannelFeed, ChannelInfo, DEFAULT_CHANNEL, DemoReason, FeedOutcome, FeedPage};
pub use normalize::{NormalizedVideo, embed_url, merge, normalize};
pub use routes::{APP_NAME, Route, document_title};
