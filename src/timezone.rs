//! Timezone label resolution and local-time formatting
//!
//! The country source labels timezones either as IANA names ("Asia/Tokyo")
//! or as fixed offsets ("UTC+05:30"). Unresolvable labels fall back to UTC.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

/// Output format for local timestamps
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

enum Zone {
    Named(Tz),
    Offset(FixedOffset),
}

fn resolve_zone(label: &str) -> Option<Zone> {
    if let Ok(tz) = label.parse::<Tz>() {
        return Some(Zone::Named(tz));
    }
    parse_utc_offset(label).map(Zone::Offset)
}

/// Parses offset labels of the form `UTC`, `UTC+05:30` or `UTC-03:00`
fn parse_utc_offset(label: &str) -> Option<FixedOffset> {
    let rest = label.strip_prefix("UTC")?;
    if rest.is_empty() {
        return FixedOffset::east_opt(0);
    }

    let (sign, hm) = if let Some(hm) = rest.strip_prefix('+') {
        (1, hm)
    } else if let Some(hm) = rest.strip_prefix('-') {
        (-1, hm)
    } else {
        return None;
    };

    let (hours, minutes) = hm.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Formats `at` as local time in the zone named by `label`
///
/// Falls back to UTC when the label is neither an IANA name nor a
/// `UTC±HH:MM` offset.
pub fn format_in_zone(label: &str, at: DateTime<Utc>) -> String {
    match resolve_zone(label) {
        Some(Zone::Named(tz)) => at.with_timezone(&tz).format(TIME_FORMAT).to_string(),
        Some(Zone::Offset(offset)) => at.with_timezone(&offset).format(TIME_FORMAT).to_string(),
        None => at.format(TIME_FORMAT).to_string(),
    }
}

/// Current local time in the zone named by `label`
pub fn local_time_in(label: &str) -> String {
    format_in_zone(label, Utc::now())
}
