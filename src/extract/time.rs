use chrono::{DateTime, Local, Utc};
use tracing::{debug, warn};

/// Decode a `data-time` attribute (epoch seconds) into the raw value and a
/// local timestamp.
///
/// Unparseable input decodes to `0` (the Unix epoch) and is logged; an
/// absent attribute decodes to `0` silently.
#[must_use]
pub fn decode(epoch_text: &str) -> (i64, DateTime<Local>) {
    let seconds = parse_seconds(epoch_text);

    let timestamp = DateTime::from_timestamp(seconds, 0).unwrap_or_else(|| {
        warn!(seconds, "Timestamp out of range, using the Unix epoch");
        DateTime::<Utc>::UNIX_EPOCH
    });

    (seconds, timestamp.with_timezone(&Local))
}

fn parse_seconds(epoch_text: &str) -> i64 {
    let trimmed = epoch_text.trim();
    if trimmed.is_empty() {
        debug!("Missing timestamp, defaulting to 0");
        return 0;
    }

    trimmed.parse().unwrap_or_else(|e| {
        warn!(value = %epoch_text, error = %e, "Unparseable timestamp, defaulting to 0");
        0
    })
}
