//! Built-in videos served when YouTube cannot or should not be asked.

use crate::feed::FeedPage;
use crate::normalize::{NormalizedVideo, default_thumbnail_url, embed_url};

struct DemoVideo {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    published_at: &'static str,
    channel_title: &'static str,
    duration: &'static str,
    view_count: &'static str,
    like_count: &'static str,
}

const DEMO_VIDEOS: [DemoVideo; 3] = [
    DemoVideo {
        id: "jNQXAC9IVRw",
        title: "Me at the zoo",
        description: "The first video on YouTube!",
        published_at: "2005-04-23T23:31:52Z",
        channel_title: "jawed",
        duration: "PT19S",
        view_count: "300000000",
        like_count: "5000000",
    },
    DemoVideo {
        id: "L_jWHffIx5E",
        title: "Smash Mouth - All Star (Official Music Video)",
        description: "Official music video for Smash Mouth - All Star",
        published_at: "2010-06-16T23:15:40Z",
        channel_title: "Smash Mouth",
        duration: "PT3M20S",
        view_count: "500000000",
        like_count: "5000000",
    },
    DemoVideo {
        id: "ZZ5LpwO-An4",
        title: "HEYYEYAAEYAAAEYAEYAA",
        description: "He-Man sings",
        published_at: "2005-04-19T07:14:26Z",
        channel_title: "slackcircus",
        duration: "PT1M4S",
        view_count: "50000000",
        like_count: "800000",
    },
];

impl From<&DemoVideo> for NormalizedVideo {
    fn from(demo: &DemoVideo) -> Self {
        NormalizedVideo {
            id: demo.id.to_string(),
            title: demo.title.to_string(),
            description: demo.description.to_string(),
            thumbnail_url: default_thumbnail_url(demo.id),
            published_at: demo.published_at.to_string(),
            channel_title: demo.channel_title.to_string(),
            duration: demo.duration.to_string(),
            view_count: demo.view_count.to_string(),
            like_count: demo.like_count.to_string(),
            embed_url: embed_url(demo.id),
        }
    }
}

/// The fixed demo page: three well-known public videos, no next page.
pub fn demo_page() -> FeedPage {
    let videos: Vec<NormalizedVideo> = DEMO_VIDEOS.iter().map(NormalizedVideo::from).collect();
    let total_results = videos.len() as u32;
    FeedPage::new(videos, None, total_results)
}
