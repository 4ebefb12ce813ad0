//! Drives the crawler against a profile page and assembles the results.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::crawler::{Collector, FetchError, HttpFetcher, PageFetcher};
use crate::extract::profile::{self, ProfileUpdate, BODY, HEADER_CARD, PROFILE_NAV};
use crate::extract::tweet::{extract_tweet, TWEET};
use crate::extract::join_url;
use crate::models::{Tweet, User};

/// Scrapes profiles and timelines from one site.
#[derive(Clone)]
pub struct Scraper {
    fetcher: Arc<dyn PageFetcher>,
    base_url: String,
    allowed_domain: Option<String>,
}

impl Scraper {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            allowed_domain: config.allowed_domain(),
        }
    }

    /// Create a scraper that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config.request_timeout)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    fn collector<U>(&self) -> Collector<U> {
        let mut collector =
            Collector::new(self.fetcher.clone()).allowed_domains(self.allowed_domain.clone());

        collector.on_request(|url| info!(url = %url, "Visiting"));
        collector.on_error(|status, error| {
            warn!(status = ?status, error = %error, "Request failed");
        });

        collector
    }

    /// Scrape the profile of `handle`.
    ///
    /// A failed fetch is logged and leaves the profile at its defaults.
    pub async fn scrape_profile(&self, handle: &str) -> User {
        let mut collector = self.collector::<ProfileUpdate>();
        collector.on_html(HEADER_CARD.clone(), |card| {
            Some(profile::extract_header(card))
        });
        collector.on_html(PROFILE_NAV.clone(), |nav| Some(profile::extract_id(nav)));
        collector.on_html(BODY.clone(), |body| Some(profile::extract_visibility(body)));

        let updates = collector
            .visit(&join_url(&self.base_url, handle))
            .await
            .unwrap_or_default();

        profile::build_user(handle, &self.base_url, updates)
    }

    /// Scrape the visible timeline of `handle`, oldest tweet first.
    ///
    /// A failed fetch is logged and yields an empty timeline.
    pub async fn scrape_timeline(&self, handle: &str) -> Vec<Tweet> {
        let mut collector = self.collector::<Tweet>();
        let base_url = self.base_url.clone();
        collector.on_html(TWEET.clone(), move |tweet| {
            Some(extract_tweet(tweet, &base_url))
        });

        let tweets = collector
            .visit(&join_url(&self.base_url, handle))
            .await
            .unwrap_or_default();

        reverse_document_order(tweets)
    }
}

/// Flip document order (newest first) into chronological order.
#[must_use]
pub fn reverse_document_order<T>(mut items: Vec<T>) -> Vec<T> {
    items.reverse();
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::StaticFetcher;

    #[test]
    fn test_reverse_document_order() {
        assert_eq!(reverse_document_order(vec![1, 2, 3]), vec![3, 2, 1]);
        assert_eq!(reverse_document_order(vec!["only"]), vec!["only"]);
        assert!(reverse_document_order(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let items: Vec<u32> = (0..50).map(|i| i * 7 % 13).collect();
        let reversed = reverse_document_order(items.clone());
        assert_eq!(reversed.len(), items.len());

        let mut sorted_a = items.clone();
        let mut sorted_b = reversed.clone();
        sorted_a.sort_unstable();
        sorted_b.sort_unstable();
        assert_eq!(sorted_a, sorted_b);

        assert_eq!(reverse_document_order(reversed), items);
    }

    const TIMELINE: &str = r#"
        <html><body>
            <div class="ProfileNav" data-user-id="99"></div>
            <ol id="stream-items-id">
                <li><div class="tweet" data-item-id="3"><span class="_timestamp" data-time="300"></span></div></li>
                <li><div class="tweet" data-item-id="2" data-retweeter="alice"><span class="_timestamp" data-time="200"></span></div></li>
                <li><div class="tweet" data-item-id="1"><span class="_timestamp" data-time="100"></span></div></li>
            </ol>
            <div class="PermalinkOverlay"><div class="tweet modal-body" data-item-id="0"></div></div>
        </body></html>
    "#;

    fn scraper() -> Scraper {
        let fetcher = StaticFetcher::new().with_page("https://twitter.com/fyko", TIMELINE);
        Scraper::new(Arc::new(fetcher), &Config::for_testing())
    }

    #[tokio::test]
    async fn test_scrape_timeline_oldest_first() {
        let tweets = scraper().scrape_timeline("fyko").await;
        let ids: Vec<&str> = tweets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(tweets[1].retweet);
        assert_eq!(tweets[1].retweeted_by, "alice");
        assert!(!tweets[0].retweet);
        assert_eq!(tweets[0].retweeted_by, "");
    }

    #[tokio::test]
    async fn test_scrape_timeline_unknown_handle() {
        assert!(scraper().scrape_timeline("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_profile() {
        let user = scraper().scrape_profile("fyko").await;
        assert_eq!(user.id, "99");
        assert_eq!(user.url, "https://twitter.com/fyko");
        assert!(!user.private);
    }

    #[tokio::test]
    async fn test_scrape_profile_fetch_failure() {
        let user = scraper().scrape_profile("nobody").await;
        assert_eq!(user.id, "");
        assert_eq!(user.url, "https://twitter.com/nobody");
    }
}
