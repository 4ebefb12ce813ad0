//! Document crawler: fetches one page, parses it, and hands every element
//! matching a registered selector to its callback.
//!
//! The fetch itself sits behind [`PageFetcher`] so the extraction pipeline can
//! run against live HTTP ([`HttpFetcher`]) or a canned document
//! ([`StaticFetcher`]).

mod fetcher;

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use fetcher::{HttpFetcher, StaticFetcher};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::Client(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("domain not allowed: {0}")]
    ForbiddenDomain(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl CrawlError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status(),
            _ => None,
        }
    }
}

/// Retrieves the raw markup behind a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

type ElementCallback<U> = Box<dyn Fn(ElementRef<'_>) -> Option<U> + Send + Sync>;
type RequestHook = Box<dyn Fn(&Url) + Send + Sync>;
type ErrorHook = Box<dyn Fn(Option<u16>, &CrawlError) + Send + Sync>;

/// Selector-driven collector for a single kind of record `U`.
///
/// Callbacks run in registration order; within one callback, matches are
/// visited in document order. Each callback returns its own record, so no
/// state is shared between invocations.
pub struct Collector<U> {
    fetcher: Arc<dyn PageFetcher>,
    allowed_domains: Vec<String>,
    handlers: Vec<(Selector, ElementCallback<U>)>,
    request_hooks: Vec<RequestHook>,
    error_hooks: Vec<ErrorHook>,
}

impl<U> Collector<U> {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            allowed_domains: Vec::new(),
            handlers: Vec::new(),
            request_hooks: Vec::new(),
            error_hooks: Vec::new(),
        }
    }

    /// Restrict visits to the given hosts. An empty list allows everything.
    #[must_use]
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = domains
            .into_iter()
            .map(|d| d.into().to_lowercase())
            .collect();
        self
    }

    /// Register a callback invoked once per element matching `selector`.
    /// Returning `None` drops the match.
    pub fn on_html<F>(&mut self, selector: Selector, callback: F)
    where
        F: Fn(ElementRef<'_>) -> Option<U> + Send + Sync + 'static,
    {
        self.handlers.push((selector, Box::new(callback)));
    }

    /// Observe every request before it is sent.
    pub fn on_request<F>(&mut self, hook: F)
    where
        F: Fn(&Url) + Send + Sync + 'static,
    {
        self.request_hooks.push(Box::new(hook));
    }

    /// Observe failures, with the HTTP status when one is known.
    pub fn on_error<F>(&mut self, hook: F)
    where
        F: Fn(Option<u16>, &CrawlError) + Send + Sync + 'static,
    {
        self.error_hooks.push(Box::new(hook));
    }

    fn is_allowed(&self, url: &Url) -> bool {
        if self.allowed_domains.is_empty() {
            return true;
        }
        url.host_str()
            .map(str::to_lowercase)
            .is_some_and(|host| self.allowed_domains.iter().any(|d| *d == host))
    }

    /// Fetch `url` and run every registered callback against the parsed
    /// document. Resolves once all callbacks have completed.
    ///
    /// Failures are passed to the error hooks before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, its host is not allowed, or the
    /// fetch fails.
    pub async fn visit(&self, url: &str) -> Result<Vec<U>, CrawlError> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(source) => {
                return Err(self.report(CrawlError::InvalidUrl {
                    url: url.to_string(),
                    source,
                }))
            }
        };

        if !self.is_allowed(&parsed) {
            return Err(self.report(CrawlError::ForbiddenDomain(
                parsed.host_str().unwrap_or_default().to_string(),
            )));
        }

        for hook in &self.request_hooks {
            hook(&parsed);
        }

        let body = match self.fetcher.fetch(&parsed).await {
            Ok(body) => body,
            Err(e) => return Err(self.report(e.into())),
        };

        Ok(self.dispatch(&body))
    }

    /// Run the callbacks over an already-fetched document.
    #[must_use]
    pub fn dispatch(&self, body: &str) -> Vec<U> {
        let document = Html::parse_document(body);
        let mut records = Vec::new();

        for (selector, callback) in &self.handlers {
            let before = records.len();
            records.extend(document.select(selector).filter_map(|element| callback(element)));
            debug!(matched = records.len() - before, "Selector callback finished");
        }

        records
    }

    fn report(&self, error: CrawlError) -> CrawlError {
        let status = error.status();
        for hook in &self.error_hooks {
            hook(status, &error);
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <ul>
                <li class="item" data-n="1">one</li>
                <li class="item" data-n="2">two</li>
                <li class="item skip" data-n="3">three</li>
            </ul>
            <p class="note">note</p>
        </body></html>
    "#;

    fn collector() -> Collector<String> {
        let fetcher = StaticFetcher::new().with_page("https://example.com/page", PAGE);
        Collector::new(Arc::new(fetcher)).allowed_domains(["example.com"])
    }

    #[tokio::test]
    async fn test_visit_runs_callbacks_in_order() {
        let mut c = collector();
        c.on_html(Selector::parse(".note").unwrap(), |e| {
            Some(e.text().collect::<String>())
        });
        c.on_html(Selector::parse(".item:not(.skip)").unwrap(), |e| {
            e.value().attr("data-n").map(str::to_string)
        });

        let records = c.visit("https://example.com/page").await.unwrap();
        assert_eq!(records, vec!["note", "1", "2"]);
    }

    #[tokio::test]
    async fn test_visit_rejects_other_domains() {
        let errors = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(AtomicUsize::new(0));

        let mut c = collector();
        let seen = errors.clone();
        c.on_error(move |status, err| {
            assert!(status.is_none());
            assert!(matches!(err, CrawlError::ForbiddenDomain(_)));
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let seen = requests.clone();
        c.on_request(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let result = c.visit("https://other.example.org/page").await;
        assert!(matches!(result, Err(CrawlError::ForbiddenDomain(host)) if host == "other.example.org"));
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_visit_reports_missing_page() {
        let statuses = Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut c = collector();
        let seen = statuses.clone();
        c.on_error(move |status, _| seen.lock().unwrap().push(status));

        let result = c.visit("https://example.com/missing").await;
        assert!(matches!(result, Err(CrawlError::Fetch(FetchError::Status { status: 404, .. }))));
        assert_eq!(*statuses.lock().unwrap(), vec![Some(404)]);
    }

    #[tokio::test]
    async fn test_visit_invalid_url() {
        let c = collector();
        assert!(matches!(
            c.visit("not a url").await,
            Err(CrawlError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_dispatch_without_handlers() {
        let c = collector();
        assert!(c.dispatch(PAGE).is_empty());
    }
}
