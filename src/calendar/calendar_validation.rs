//! Validation helpers for date keys and month anchors.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::CalendarError;

static DATE_KEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static MONTH_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").unwrap());

/// Check that a string has the canonical `YYYY-MM-DD` shape and names a real
/// calendar date.
pub fn is_valid_date_key(key: &str) -> bool {
    parse_date_key(key).is_ok()
}

/// Parse a canonical date key back into a date.
///
/// Rejects anything that is not a real calendar date (e.g. `2024-02-30`)
/// rather than producing a key that could never match a bucket.
pub fn parse_date_key(key: &str) -> Result<NaiveDate, CalendarError> {
    if !DATE_KEY_RE.is_match(key) {
        return Err(CalendarError::InvalidDateKey(key.to_string()));
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDateKey(key.to_string()))
}

/// Parse a `YYYY-MM` month anchor into the first day of that month.
pub fn parse_month_anchor(anchor: &str) -> Result<NaiveDate, CalendarError> {
    if !MONTH_ANCHOR_RE.is_match(anchor) {
        return Err(CalendarError::InvalidMonthAnchor(anchor.to_string()));
    }
    parse_date_key(&format!("{}-01", anchor))
        .map_err(|_| CalendarError::InvalidMonthAnchor(anchor.to_string()))
}
