//! Local-time timestamp formatting shared by the event log.

use chrono::{DateTime, Local};

/// Format string producing `YYYY-MM-DD HH:MM:SS`, zero padded, 24 hour.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the provided instant in the log's timestamp format.
#[must_use]
pub fn format(instant: DateTime<Local>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Renders the current local time in the log's timestamp format.
#[must_use]
pub fn now() -> String {
    format(Local::now())
}

/// Reports whether `text` is a well-formed log timestamp.
///
/// Checks shape only (digit and separator positions), not calendar
/// validity; the formatter above is the single source of real values.
#[must_use]
pub fn is_well_formed(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 19 {
        return false;
    }
    bytes.iter().enumerate().all(|(index, byte)| match index {
        4 | 7 => *byte == b'-',
        10 => *byte == b' ',
        13 | 16 => *byte == b':',
        _ => byte.is_ascii_digit(),
    })
}
