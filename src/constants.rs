//! Shared constants used across the application.

/// User agent string used for profile page requests.
///
/// The legacy profile markup is only served to regular browsers, so requests
/// identify as a desktop Chrome build.
pub const SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Canonical origin for profiles, permalinks and quoted posts.
pub const TWITTER_BASE_URL: &str = "https://twitter.com";

/// Heading shown in place of the timeline on protected accounts.
pub const PROTECTED_TIMELINE_TEXT: &str = "This account's Tweets are protected.";
