//! `<date>` text conversion.
//!
//! Two families are accepted, picked by sniffing the text:
//!
//! - ISO 8601 (`2012-02-24T10:10:00Z`) when the text before the first `-`
//!   is a number.
//! - RFC 1123 and its relatives (`Sun, 13 Feb 2011 12:01:00 GMT-0500`)
//!   otherwise.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

const ISO_WITH_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%z";
const ISO_NAIVE: &str = "%Y-%m-%dT%H:%M:%S";
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S %z";
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Parse the text of a `<date>` element.
///
/// Empty text is an unset date, not an error.
pub fn parse_date(text: &str) -> Result<Option<DateTime<FixedOffset>>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if looks_like_iso(text) {
        parse_iso(text).map(Some)
    } else {
        parse_rfc(text).map(Some)
    }
}

fn looks_like_iso(text: &str) -> bool {
    text.split_once('-')
        .map_or(false, |(year, _)| year.parse::<i64>().is_ok())
}

fn parse_iso(text: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(d) = DateTime::parse_from_rfc3339(text) {
        return Ok(d);
    }
    if let Ok(d) = DateTime::parse_from_str(text, ISO_WITH_OFFSET) {
        return Ok(d);
    }
    NaiveDateTime::parse_from_str(text, ISO_NAIVE)
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| format!("not an ISO 8601 date ({})", e))
}

fn parse_rfc(text: &str) -> Result<DateTime<FixedOffset>, String> {
    let normalized = normalize_zone(text);
    if let Ok(d) = DateTime::parse_from_rfc2822(&normalized) {
        return Ok(d);
    }
    if let Ok(d) = DateTime::parse_from_str(&normalized, RFC_850) {
        return Ok(d);
    }
    NaiveDateTime::parse_from_str(text, ASCTIME)
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| format!("not an RFC 1123 date ({})", e))
}

/// Rewrite a trailing `GMT`, `UTC` or `UT` zone, with or without an offset
/// suffix, as a plain numeric offset: `GMT-0500` becomes `-0500`, `GMT`
/// becomes `+0000`. Other zones are left for the RFC 2822 parser.
fn normalize_zone(text: &str) -> String {
    let (head, zone) = match text.rsplit_once(' ') {
        Some(split) => split,
        None => return text.to_string(),
    };
    let upper = zone.to_ascii_uppercase();
    for prefix in ["GMT", "UTC", "UT"] {
        if let Some(offset) = upper.strip_prefix(prefix) {
            if offset.is_empty() {
                return format!("{} +0000", head);
            }
            if offset.starts_with('+') || offset.starts_with('-') {
                return format!("{} {}", head, offset.replace(':', ""));
            }
        }
    }
    text.to_string()
}
