//! Image and video attachments.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::attr;
use crate::models::Video;

static MEDIA_IMAGES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".AdaptiveMedia-container img").unwrap());

static VIDEO_PLAYERS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".PlayableMedia-player").unwrap());

/// Preview image URL inside a `background-image` style; group 1 is the video id.
static VIDEO_PREVIEW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://.+/(\w+)\.jpg").unwrap());

/// Decode a video from the inline style of a player element.
///
/// Only styles mentioning `background` are considered.
#[must_use]
pub fn extract_video(style: &str) -> Option<Video> {
    if !style.contains("background") {
        return None;
    }

    let caps = VIDEO_PREVIEW.captures(style)?;
    Some(Video {
        id: caps.get(1)?.as_str().to_string(),
        preview: caps.get(0)?.as_str().to_string(),
    })
}

/// `src` of every attached image, in document order.
#[must_use]
pub fn extract_images(tweet: ElementRef<'_>) -> Vec<String> {
    tweet
        .select(&MEDIA_IMAGES)
        .map(|img| attr(img, "src"))
        .collect()
}

/// Videos decodable from the tweet's players, in document order.
#[must_use]
pub fn extract_videos(tweet: ElementRef<'_>) -> Vec<Video> {
    tweet
        .select(&VIDEO_PLAYERS)
        .filter_map(|player| player.value().attr("style"))
        .filter(|style| style.len() > 1)
        .filter_map(extract_video)
        .collect()
}
