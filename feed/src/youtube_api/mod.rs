//! YouTube Data API v3 client library.
//!
//! Only the key-authenticated, read-only slice of the API that the feed needs is covered:
//!
//! - `search.list` scoped to a channel, for listing a channel's videos newest first;
//! - `search.list` by free text with `type=channel`, for resolving a channel by name;
//! - `videos.list` by a batch of IDs, for durations and statistics.
//!
//! Requests go through a [`Transport`], which is [`ReqwestTransport`] in production.

pub mod client;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod search;
pub mod transport;
pub mod types;
pub mod videos;

pub use client::YouTubeClient;
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{PageInfo, PagedStream};

pub use search::{SearchListResponse, SearchResult, SearchResultId, SearchSnippet, Thumbnails};

pub use videos::{Video, VideoContentDetails, VideoListResponse, VideoStatistics};
