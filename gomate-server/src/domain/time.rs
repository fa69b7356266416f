//! Timestamp and duration formatting.
//!
//! The transport API delivers durations as `"DDdHH:MM:SS"` or
//! `"HH:MM:SS"` and timestamps as ISO-8601 with a local UTC offset.
//! Formatting is deliberately lenient: anything that doesn't match is
//! passed through unchanged rather than rejected.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Timelike};
use regex::Regex;

/// Duration with a day component, e.g. `"00d01:23:45"`.
static DAY_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)d(\d+):(\d+):(\d+)").unwrap());

/// Duration without a day component, e.g. `"01:23:45"`.
static TIME_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+):(\d+):(\d+)").unwrap());

/// Format an upstream duration string as `"{hours}h {MM}m {SS}s"`.
///
/// Days are folded into the hour count (`26h` for `"01d02:..."`); the
/// hour component is not zero-padded, while the minute and second
/// captures are kept verbatim. Strings matching neither pattern (for
/// example the `"N/A"` sentinel) are returned unchanged.
pub fn format_duration(duration: &str) -> String {
    if let Some(caps) = DAY_DURATION.captures(duration)
        && let (Ok(days), Ok(hours)) = (caps[1].parse::<u64>(), caps[2].parse::<u64>())
    {
        return format!("{}h {}m {}s", hours + days * 24, &caps[3], &caps[4]);
    }

    if let Some(caps) = TIME_DURATION.captures(duration)
        && let Ok(hours) = caps[1].parse::<u64>()
    {
        return format!("{}h {}m {}s", hours, &caps[2], &caps[3]);
    }

    duration.to_string()
}

/// Parse an ISO-8601 timestamp as delivered by the transport API.
///
/// Accepts both RFC 3339 (`+01:00`) and the API's compact offset form
/// (`+0100`).
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Format an ISO-8601 timestamp as zero-padded 24-hour `HH:MM`.
///
/// The time is rendered in the timestamp's own UTC offset, which for
/// this API is Swiss local time. Returns `None` for unparseable input.
pub fn format_time(timestamp: &str) -> Option<String> {
    let parsed = parse_timestamp(timestamp)?;
    Some(format!("{:02}:{:02}", parsed.hour(), parsed.minute()))
}
