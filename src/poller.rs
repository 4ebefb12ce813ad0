use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::info;

use crate::config::Config;
use crate::scrape::Scraper;
use crate::snapshot::{self, SnapshotError};

/// Outcome of one scrape.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub tweets: usize,
    pub elapsed: Duration,
}

/// Scrape once and write the snapshot to `out`: the profile first when
/// `include_profile` is set, then the timeline, then the elapsed time.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be serialized or written.
pub async fn run_once<W: Write + ?Sized>(
    scraper: &Scraper,
    config: &Config,
    out: &mut W,
) -> Result<RunReport, SnapshotError> {
    let start = Instant::now();

    if config.include_profile {
        let user = scraper.scrape_profile(&config.handle).await;
        snapshot::write_json(out, &user)?;
    }

    let tweets = scraper.scrape_timeline(&config.handle).await;
    snapshot::write_json(out, &tweets)?;

    let elapsed = start.elapsed();
    snapshot::write_elapsed(out, elapsed)?;

    info!(
        handle = %config.handle,
        tweets = tweets.len(),
        elapsed_ms = elapsed.as_millis(),
        "Scrape complete"
    );

    Ok(RunReport {
        tweets: tweets.len(),
        elapsed,
    })
}

/// Ticker for the poll loop. The first tick completes immediately; ticks
/// missed while a run is in progress are dropped, and the next one lands on
/// the following multiple of `period`.
#[must_use]
pub fn poll_ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Scrape every `poll_interval` until a snapshot fails to serialize.
///
/// Runs never overlap: a run that outlasts the interval causes the missed
/// ticks to be skipped, and the next run starts on the following tick.
///
/// # Errors
///
/// Returns an error if a snapshot cannot be serialized or written.
pub async fn poll_loop(config: Config, scraper: Scraper) -> Result<()> {
    let mut ticker = poll_ticker(config.poll_interval);

    info!(
        handle = %config.handle,
        interval_secs = config.poll_interval.as_secs(),
        "Starting poll loop"
    );

    loop {
        ticker.tick().await;

        let mut buf = Vec::new();
        run_once(&scraper, &config, &mut buf)
            .await
            .context("Failed to emit snapshot")?;

        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&buf)
            .and_then(|()| stdout.flush())
            .context("Failed to write snapshot to stdout")?;
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_overrun_skips_missed_ticks() {
        let period = Duration::from_secs(10);
        let mut ticker = poll_ticker(period);
        let start = Instant::now();

        // The first run takes 2.5 periods, the rest finish instantly.
        let run_lengths = [25, 0, 0, 0];
        let mut starts = Vec::new();
        for secs in run_lengths {
            ticker.tick().await;
            starts.push(start.elapsed().as_secs());
            tokio::time::sleep(Duration::from_secs(secs)).await;
        }

        // One late tick right after the overrun, then back on the 10s grid
        // with no burst of the ticks missed at 10s and 20s.
        assert_eq!(starts, vec![0, 25, 30, 40]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_do_not_overlap() {
        let mut ticker = poll_ticker(Duration::from_secs(1));
        let start = Instant::now();

        let mut finished_at = Duration::ZERO;
        for _ in 0..3 {
            ticker.tick().await;
            assert!(start.elapsed() >= finished_at);
            tokio::time::sleep(Duration::from_millis(2500)).await;
            finished_at = start.elapsed();
        }
        assert_eq!(finished_at, Duration::from_millis(7500));
    }
}
