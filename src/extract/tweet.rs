//! Timeline entries, including quoted tweets and shortened links.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::{attr, child_attr, has_class, inside_class, join_url, media, text, time};
use crate::models::{Quote, TCo, Tweet};

/// Timeline entries, skipping the copy rendered inside the permalink overlay.
pub static TWEET: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".tweet:not(.modal-body)").unwrap());

static TIMESTAMP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("._timestamp").unwrap());
static TWEET_TEXT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".tweet-text").unwrap());
static QUOTE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".QuoteTweet-innerContainer").unwrap());
static TIMELINE_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.twitter-timeline-link:not(.u-hidden)").unwrap());

const QUOTE_CONTAINER_CLASS: &str = "QuoteTweet-innerContainer";
const PINNED_CLASS: &str = "user-pinned";

/// Build a tweet from one timeline entry. Permalinks resolve against `base_url`.
#[must_use]
pub fn extract_tweet(tweet: ElementRef<'_>, base_url: &str) -> Tweet {
    let (created_at_timestamp, created_at) =
        time::decode(&child_attr(tweet, &TIMESTAMP, "data-time"));
    let retweeted_by = attr(tweet, "data-retweeter");

    Tweet {
        created_at_timestamp,
        created_at,
        id: attr(tweet, "data-item-id"),
        images: media::extract_images(tweet),
        quote: extract_quote(tweet, base_url),
        pinned: has_class(tweet, PINNED_CLASS),
        retweet: !retweeted_by.is_empty(),
        retweeted_by,
        url: join_url(base_url, &attr(tweet, "data-permalink-path")),
        urls: extract_links(tweet),
        text: text::normalize(&own_text(tweet)),
        videos: media::extract_videos(tweet),
    }
}

/// Body text of the tweet itself; text of an embedded quote is left out.
fn own_text(tweet: ElementRef<'_>) -> String {
    tweet
        .select(&TWEET_TEXT)
        .filter(|element| !inside_class(*element, QUOTE_CONTAINER_CLASS))
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// The quoted tweet embedded in `tweet`, if any. When several containers
/// are present the last one wins.
#[must_use]
pub fn extract_quote(tweet: ElementRef<'_>, base_url: &str) -> Option<Quote> {
    let container = tweet.select(&QUOTE_CONTAINER).last()?;

    Some(Quote {
        user_name: attr(container, "data-screen-name"),
        id: attr(container, "data-item-id"),
        text: super::child_text(container, &TWEET_TEXT),
        url: join_url(base_url, &attr(container, "href")),
    })
}

/// Visible shortened links with their expansions, in document order.
#[must_use]
pub fn extract_links(tweet: ElementRef<'_>) -> Vec<TCo> {
    tweet
        .select(&TIMELINE_LINKS)
        .map(|link| TCo {
            short: attr(link, "href"),
            expand: attr(link, "data-expanded-url"),
        })
        .collect()
}
