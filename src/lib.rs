//! Twitter timeline scraper library.
//!
//! Fetches a public profile page, extracts the profile and its visible
//! timeline from the markup, and emits them as JSON snapshots on a fixed
//! polling interval.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod config;
pub mod constants;
pub mod crawler;
pub mod extract;
pub mod models;
pub mod poller;
pub mod scrape;
pub mod snapshot;

pub use poller::{poll_loop, run_once};
pub use scrape::Scraper;
