//! Date helper functions

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Format an instant as a local `YYYY-MM-DD` date
pub fn format_ymd<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Format an instant for RSS `<pubDate>`
pub fn date_rfc2822(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc2822()
}

/// Parse a front-matter date string in various formats
///
/// Dates without a time of day resolve to local midnight.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_fixed(naive);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return local_fixed(d.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}

fn local_fixed(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}
