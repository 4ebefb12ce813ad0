//! Records produced by the extractors.
//!
//! Field names serialize in `PascalCase` and in declaration order, which is
//! the layout downstream consumers of the snapshots expect.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A `t.co` shortened link and the URL it expands to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TCo {
    pub short: String,
    pub expand: String,
}

/// A video attachment, identified by its preview image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Video {
    #[serde(rename = "ID")]
    pub id: String,
    pub preview: String,
}

/// A tweet embedded in another tweet with added commentary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quote {
    pub user_name: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub text: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tweet {
    pub created_at_timestamp: i64,
    pub created_at: DateTime<Local>,
    #[serde(rename = "ID")]
    pub id: String,
    pub images: Vec<String>,
    pub quote: Option<Quote>,
    pub pinned: bool,
    pub retweet: bool,
    pub retweeted_by: String,
    #[serde(rename = "URL")]
    pub url: String,
    pub urls: Vec<TCo>,
    pub text: String,
    pub videos: Vec<Video>,
}

impl Default for Tweet {
    fn default() -> Self {
        Self {
            created_at_timestamp: 0,
            created_at: DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local),
            id: String::new(),
            images: Vec::new(),
            quote: None,
            pinned: false,
            retweet: false,
            retweeted_by: String::new(),
            url: String::new(),
            urls: Vec::new(),
            text: String::new(),
            videos: Vec::new(),
        }
    }
}

/// Public profile of the scraped account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub avatar: String,
    pub banner: String,
    pub biography: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub location: String,
    pub name: String,
    pub private: bool,
    #[serde(rename = "URL")]
    pub url: String,
    pub username: String,
    pub website: String,
}
