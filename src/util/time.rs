//! Timestamp helpers.
//!
//! Every persisted timestamp is a fixed-width RFC3339 UTC string so that
//! lexicographic comparison matches chronological order. The repository
//! range guards and descending sorts rely on this.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Current instant as a fixed-width RFC3339 UTC string.
pub fn now_rfc3339() -> String {
    format_rfc3339(Utc::now())
}

/// Instant `duration` before now, same encoding as [`now_rfc3339`].
pub fn rfc3339_ago(duration: Duration) -> String {
    format_rfc3339(Utc::now() - duration)
}

/// Current UTC date as `YYYY-MM-DD`, used for blog publish dates.
pub fn today_ymd() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

fn format_rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
