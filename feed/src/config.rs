//! Feed configuration.
//!
//! The configuration is an explicit value handed to [`ChannelFeed`](crate::ChannelFeed) rather
//! than global process state. Build one with [`FeedConfig::builder`], or read it from the
//! environment once at startup with [`FeedConfig::from_env`].

use derive_builder::Builder;

/// Base URL of the YouTube Data API v3.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Number of videos fetched per page when the caller does not ask for a specific amount.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
const API_BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
const PAGE_SIZE_VAR: &str = "YOUTUBE_FEED_PAGE_SIZE";

#[derive(Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct FeedConfig {
    /// The YouTube Data API key.
    ///
    /// Without one, the feed permanently serves demo content.
    #[builder(setter(into, strip_option), default)]
    api_key: Option<String>,

    /// Where to send API requests; only worth changing for proxies and tests.
    #[builder(setter(into), default = "DEFAULT_API_BASE_URL.to_string()")]
    api_base_url: String,

    /// Default `maxResults` for feed pages.
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    page_size: u32,
}

impl std::fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl FeedConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(page_size) = self.page_size
            && page_size == 0
        {
            return Err("page size must be at least 1".to_string());
        }
        if let Some(base) = &self.api_base_url
            && base.trim().is_empty()
        {
            return Err("API base URL must not be empty".to_string());
        }
        Ok(())
    }
}

impl FeedConfig {
    pub fn builder() -> FeedConfigBuilder {
        FeedConfigBuilder::default()
    }

    /// Reads the configuration from the process environment, loading `.env` first if present.
    ///
    /// An unset or empty `YOUTUBE_API_KEY` is not an error; it selects demo mode.
    pub fn from_env() -> Result<Self, FeedConfigBuilderError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
        }

        let mut builder = Self::builder();
        if let Ok(key) = std::env::var(API_KEY_VAR) {
            builder.api_key(key);
        }
        if let Ok(base) = std::env::var(API_BASE_URL_VAR) {
            builder.api_base_url(base);
        }
        if let Ok(page_size) = std::env::var(PAGE_SIZE_VAR) {
            let page_size = page_size.trim().parse().map_err(|e| {
                FeedConfigBuilderError::ValidationError(format!(
                    "{PAGE_SIZE_VAR}={page_size:?} is not a page size: {e}"
                ))
            })?;
            builder.page_size(page_size);
        }

        let config = builder.build()?;
        if config.api_key().is_some() {
            tracing::info!("YouTube API key is configured");
        } else {
            tracing::warn!("{API_KEY_VAR} is not set; serving demo videos");
        }
        Ok(config)
    }

    /// The API key, if one is configured. Blank keys count as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether the feed will serve demo content without ever calling YouTube.
    pub fn is_demo_mode(&self) -> bool {
        self.api_key().is_none()
    }
}
