use eyre::{Context, bail};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_shorts_feed::{
    Analytics, AnalyticsEvent, ChannelFeed, DEFAULT_CHANNEL, FeedConfig, FeedError, FeedOutcome,
    NormalizedVideo, TracingSink, embed_url,
};

const USAGE: &str = "\
usage: shorts-feed-cli [--json] <command>

commands:
  feed [CHANNEL_ID] [PAGE_TOKEN]   show one page of a channel's videos
  all [CHANNEL_ID] [LIMIT]         follow pages until LIMIT videos (default 50)
  resolve NAME                     look up a channel ID by display name
  validate                         check that YOUTUBE_API_KEY is accepted
  open VIDEO_ID                    open a video's player in the browser";

const DEFAULT_ALL_LIMIT: usize = 50;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = if let Some(i) = args.iter().position(|a| a == "--json") {
        args.remove(i);
        true
    } else {
        false
    };
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        bail!("{USAGE}");
    };

    let config = FeedConfig::from_env().wrap_err("read feed configuration")?;
    let feed = ChannelFeed::new(&config);
    let analytics = Analytics::new(Arc::new(TracingSink));

    match command.as_str() {
        "feed" => {
            let channel_id = args.next().unwrap_or_else(|| DEFAULT_CHANNEL.id.to_string());
            let page_token = args.next();
            let result = feed
                .fetch_channel_videos(&channel_id, config.page_size(), page_token.as_deref())
                .await;
            track_fetch(&analytics, &result);
            let outcome = result.wrap_err_with(|| format!("fetch feed of {channel_id}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(outcome.page())?);
                return Ok(());
            }
            if let Some(reason) = outcome.demo_reason() {
                eprintln!("==> demo videos ({reason:?})");
            } else {
                eprintln!(
                    "==> {channel_id} (~{} videos)",
                    outcome.page().total_results()
                );
            }
            for video in outcome.page().videos() {
                print_video(video);
            }
            if let Some(token) = outcome.page().next_page_token() {
                eprintln!("next page: {token}");
            }
        }
        "all" => {
            let channel_id = args.next().unwrap_or_else(|| DEFAULT_CHANNEL.id.to_string());
            let limit = match args.next() {
                Some(limit) => limit
                    .parse()
                    .wrap_err_with(|| format!("{limit:?} is not a video count"))?,
                None => DEFAULT_ALL_LIMIT,
            };

            let videos = feed
                .stream_channel_videos(&channel_id, config.page_size())
                .take(limit);
            let mut videos = std::pin::pin!(videos);
            let mut collected = Vec::new();
            while let Some(video) = videos.next().await {
                let video = match video {
                    Ok(video) => video,
                    Err(e) => {
                        track_error(&analytics, &e);
                        return Err(e).wrap_err_with(|| format!("stream videos of {channel_id}"));
                    }
                };
                if json {
                    collected.push(video);
                } else {
                    print_video(&video);
                }
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&collected)?);
            }
        }
        "resolve" => {
            let Some(name) = args.next() else {
                bail!("{USAGE}");
            };
            let channel_id = feed
                .resolve_channel_id(&name)
                .await
                .wrap_err_with(|| format!("resolve channel {name:?}"))?;
            if json {
                let found = serde_json::json!({ "name": name, "channelId": channel_id });
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                println!("{channel_id}");
            }
        }
        "validate" => {
            if config.is_demo_mode() {
                bail!("no API key configured; set YOUTUBE_API_KEY");
            }
            if !feed.validate_api_key().await {
                bail!("YouTube rejected the configured API key");
            }
            eprintln!("API key is valid");
        }
        "open" => {
            let Some(video_id) = args.next() else {
                bail!("{USAGE}");
            };
            let url = embed_url(&video_id);
            webbrowser::open(&url).wrap_err_with(|| format!("open {url} in a browser"))?;
        }
        _ => bail!("unknown command {command:?}\n\n{USAGE}"),
    }

    Ok(())
}

fn track_fetch(analytics: &Analytics, result: &Result<FeedOutcome, FeedError>) {
    analytics.track(&AnalyticsEvent::api_usage(result));
    if let Err(e) = result {
        track_error(analytics, e);
    }
}

fn track_error(analytics: &Analytics, error: &FeedError) {
    analytics.track(&AnalyticsEvent::Error {
        error_type: "api_error".to_string(),
        error_message: error.to_string(),
        video_id: None,
    });
}

fn print_video(video: &NormalizedVideo) {
    let published = video
        .published_timestamp()
        .map(|ts| ts.strftime("%Y-%m-%d").to_string())
        .unwrap_or_else(|| video.published_at().to_string());
    println!(
        "{}  {:>8}  {published}  {}  [{} views, {} likes]",
        video.id(),
        video.formatted_duration(),
        video.title(),
        video.view_count(),
        video.like_count(),
    );
    println!("    {} | {}", video.channel_title(), video.embed_url());
}
